pub mod me_handler;
