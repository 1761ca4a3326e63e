// Integration tests module

mod integration {
    mod availability_test;
    mod config_test;
    mod graph_test;
    mod history_test;
    mod keymap_test;
    mod process_test;
    mod static_view_test;
    mod theme_test;
}
