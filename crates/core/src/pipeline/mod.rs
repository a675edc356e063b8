pub mod capture_loop;
pub mod loop_logger;
pub mod self_test_use_case;
pub mod train_model_use_case;
