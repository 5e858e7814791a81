pub mod postscript;
