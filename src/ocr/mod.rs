pub mod engine;
pub mod preprocess;
pub mod readers;
pub mod setup;

pub use engine::{OcrHint, Recognizer, TesseractRecognizer};
pub use preprocess::{binarize, prepare_integer_crop, upscale};
pub use readers::{read_accuracy, read_integer, read_line_count, read_patch};
pub use setup::{find_tessdata_dir, find_tesseract_executable};
