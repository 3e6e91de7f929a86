pub mod doyle;
