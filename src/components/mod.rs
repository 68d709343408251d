pub mod dialog;
pub mod network_canvas;
pub mod schedule_view;
pub mod task_form;
pub mod task_list;
