mod slice_reader;
mod slice_writer;

pub use slice_reader::SliceReader;
pub use slice_writer::SliceWriter;
