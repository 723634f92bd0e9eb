#![allow(clippy::let_and_return)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]

#[macro_use]
extern crate log;

mod app;

fn main() {
    let return_code = app::run_app();
    std::process::exit(return_code)
}
