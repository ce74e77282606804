pub mod mnist;
pub mod sample_index;
pub mod voc_dataset_loader;
