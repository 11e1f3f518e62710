mod app;
mod code_view;
mod colors;
mod dom;
mod io;
mod joystick;
mod render;
mod settings;
mod state;
mod theme;
mod toolbar;

pub use app::run;
