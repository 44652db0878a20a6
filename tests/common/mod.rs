#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Cell contents for a generated fixture
#[derive(Debug, Clone)]
pub enum Cell {
    Text(&'static str),
    Number(f64),
    Bool(bool),
    Blank,
}

pub use Cell::{Blank, Bool, Number, Text};

/// Write an xlsx workbook with the given sheets, rows listed top to bottom
pub fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<Cell>>)]) {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();

    for (name, rows) in sheets {
        let sheet = book.new_sheet(*name).unwrap();
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                // umya uses 1-based (column, row) coordinates
                let coord = ((col_idx + 1) as u32, (row_idx + 1) as u32);
                match cell {
                    Text(s) => {
                        sheet.get_cell_mut(coord).set_value_string(*s);
                    }
                    Number(n) => {
                        sheet.get_cell_mut(coord).set_value_number(*n);
                    }
                    Bool(b) => {
                        sheet.get_cell_mut(coord).set_value_bool(*b);
                    }
                    Blank => {}
                }
            }
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

/// Sheet "Data": header id/name, rows 1/Alice and 2/Bob
pub fn people_rows() -> Vec<Vec<Cell>> {
    vec![
        vec![Text("id"), Text("name")],
        vec![Number(1.0), Text("Alice")],
        vec![Number(2.0), Text("Bob")],
    ]
}

pub fn people_workbook(dir: &Path) -> PathBuf {
    let path = dir.join("people.xlsx");
    write_workbook(&path, &[("Data", people_rows())]);
    path
}

/// Names of the `.json` files in `dir`, sorted
pub fn json_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".json"))
        .collect();
    names.sort();
    names
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
