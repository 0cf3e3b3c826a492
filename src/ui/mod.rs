/// User interface widgets for the report form
pub mod table;
