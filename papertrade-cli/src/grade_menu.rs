//! Student grade tracker menu.

use std::io::{BufRead, Write};

use anyhow::Result;
use papertrade_core::Gradebook;

use crate::console::Console;

pub fn run<R: BufRead, W: Write>(book: &mut Gradebook, console: &mut Console<R, W>) -> Result<()> {
    loop {
        let out = console.out();
        writeln!(out, "\n--- Student Grade Tracker ---")?;
        writeln!(out, "1. Add Student")?;
        writeln!(out, "2. Display All Students")?;
        writeln!(out, "3. Show Summary Report")?;
        writeln!(out, "4. Exit")?;

        let Some(choice) = console.read_number::<i64>("Enter choice: ", "Enter choice: ")? else {
            return Ok(());
        };
        match choice {
            1 => add_student(book, console)?,
            2 => {
                let out = console.out();
                if book.is_empty() {
                    writeln!(out, "No students found.")?;
                } else {
                    writeln!(out, "\n--- All Students ---")?;
                    for s in book.students() {
                        writeln!(out, "{} - {}", s.name, s.grade)?;
                    }
                }
            }
            3 => {
                let out = console.out();
                match book.summary() {
                    None => writeln!(out, "No data to summarize.")?,
                    Some(summary) => {
                        writeln!(out, "\n--- Summary Report ---")?;
                        writeln!(out, "Average Score: {:.2}", summary.average)?;
                        writeln!(
                            out,
                            "Highest Score: {} ({})",
                            summary.highest.grade, summary.highest.name
                        )?;
                        writeln!(
                            out,
                            "Lowest Score: {} ({})",
                            summary.lowest.grade, summary.lowest.name
                        )?;
                    }
                }
            }
            4 => {
                writeln!(console.out(), "Exiting program...")?;
                return Ok(());
            }
            _ => writeln!(console.out(), "Invalid choice. Try again.")?,
        }
    }
}

fn add_student<R: BufRead, W: Write>(book: &mut Gradebook, console: &mut Console<R, W>) -> Result<()> {
    let Some(name) = console.read_line("Enter student name: ")? else {
        return Ok(());
    };
    let Some(grade) = console.read_number::<f64>("Enter grade: ", "Enter a valid number: ")? else {
        return Ok(());
    };
    match book.add(&name, grade) {
        Ok(_) => writeln!(console.out(), "Student added successfully!")?,
        Err(e) => writeln!(console.out(), "Student not added: {e}.")?,
    }
    Ok(())
}
