mod label_encoding;

pub use label_encoding::LabelEncoding;
