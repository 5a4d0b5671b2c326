use std::any::TypeId;
use std::cell::RefCell;
use std::ffi::OsStr;
use std::fs::{create_dir_all, File};
use std::path::Path;

use csv::Writer;

use crate::context::Context;
use crate::error::QuarantineError;
use crate::hashing::{HashMap, HashMapExt};

pub trait Report: 'static {
    // Returns report type
    fn type_id(&self) -> TypeId;
    // Serializes the data with the correct writer
    fn serialize(&self, writer: &mut Writer<File>);
}

/// Use this macro to define a unique report type
#[macro_export]
macro_rules! define_report {
    ($name:ident) => {
        impl $crate::report::Report for $name {
            fn type_id(&self) -> std::any::TypeId {
                std::any::TypeId::of::<$name>()
            }

            fn serialize(&self, writer: &mut $crate::csv::Writer<std::fs::File>) {
                writer.serialize(self).unwrap();
            }
        }
    };
}
pub use define_report;

struct ReportData {
    file_writers: RefCell<HashMap<TypeId, Writer<File>>>,
}

// Registers a data container that stores
// * file_writers: Maps report type to file writer
crate::define_data_plugin!(
    ReportPlugin,
    ReportData,
    ReportData {
        file_writers: RefCell::new(HashMap::new()),
    }
);

// Checks that the path is valid. Creates the file and all parent directories if
// they do not exist. Returns the file if successful. Called by `add_report`
fn generate_validate_filepath(path_name: &str) -> Result<File, QuarantineError> {
    let path = Path::new(path_name);
    match path.extension().and_then(OsStr::to_str) {
        Some("csv") => {
            create_dir_all(path.parent().expect("Either root or empty path provided"))?;
            let file = File::create(path)?;
            Ok(file)
        }
        _ => Err(QuarantineError::ReportError(
            "Report output files must be CSVs at this time".to_string(),
        )),
    }
}

pub trait ContextReportExt {
    /// Call `add_report` with each report type, passing the name of the report type.
    /// Takes the complete path to which the output the report as argument.
    /// Returns `Result<(), QuarantineError>` indicating success.
    ///
    /// # Errors
    ///
    /// Returns a `QuarantineError` detailing what may have gone wrong
    fn add_report<T: Report + 'static>(&mut self, filepath: &str) -> Result<(), QuarantineError>;

    /// Write a new row with columns following items in the report struct
    /// to the report file associated with the report type struct.
    fn send_report<T: Report>(&self, report: T);
}

impl ContextReportExt for Context {
    fn add_report<T: Report + 'static>(&mut self, filepath: &str) -> Result<(), QuarantineError> {
        let file = generate_validate_filepath(filepath)?;

        let data_container = self.get_data_container_mut(ReportPlugin);
        let writer = Writer::from_writer(file);
        let mut file_writer = data_container.file_writers.borrow_mut();
        file_writer.insert(TypeId::of::<T>(), writer);
        Ok(())
    }

    fn send_report<T: Report>(&self, report: T) {
        // No data container will exist if no reports have been added
        let data_container = self
            .get_data_container(ReportPlugin)
            .expect("No writer found for the report type");
        let mut writer_cell = data_container.file_writers.try_borrow_mut().unwrap();
        let writer = writer_cell
            .get_mut(&report.type_id())
            .expect("No writer found for the report type");
        report.serialize(writer);
        writer.flush().expect("Failed to flush writer");
    }
}
