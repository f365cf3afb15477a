mod common;
mod session;
mod system;
