pub mod graph_editor;
pub mod home;
pub mod not_found;
