mod forced_logout;
mod helpers;
mod malformed;
