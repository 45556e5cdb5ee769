mod health;
mod helper;
mod send_newsletter;
