pub mod name_email;
