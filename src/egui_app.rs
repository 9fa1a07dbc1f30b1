//! egui front end: session state, the controller that mutates it, and the renderer.
pub mod controller;
pub mod state;
pub mod ui;
pub mod view_model;
