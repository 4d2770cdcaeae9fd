use crate::student::StudentRecord;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct StudentRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Age")]
    pub age: i64,
}

impl From<&StudentRecord> for StudentRow {
    fn from(record: &StudentRecord) -> Self {
        Self {
            id: record.id.get(),
            name: record.name.clone(),
            age: record.age,
        }
    }
}

/// Rounded table of students; empty string when there are none
pub fn students_table(students: &[StudentRecord]) -> String {
    if students.is_empty() {
        return String::new();
    }

    let rows: Vec<StudentRow> = students.iter().map(StudentRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
