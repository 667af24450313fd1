mod app;
mod components;
mod config;
mod controllers;
mod dom;
mod hooks;
mod services;

fn main() {
    app::start();
}
