mod contact;
mod helpers;
mod newsletter;
