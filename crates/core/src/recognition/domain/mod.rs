pub mod confidence_tracker;
