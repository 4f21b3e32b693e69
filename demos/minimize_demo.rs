//! Signature minimization walkthrough

use faultsift::{minimize, minimized_table, CsvRead, CsvWrite, FaultRecord, Table, Ternary};

fn main() -> Result<(), faultsift::SiftError> {
    println!("Fault-Signature Minimization Example\n");

    println!("Two records that differ in one pinned condition each:");
    let records = vec![
        FaultRecord::new(Ternary::Zero, Ternary::Zero, Ternary::DontCare, Ternary::DontCare, "R"),
        FaultRecord::new(Ternary::Zero, Ternary::DontCare, Ternary::Zero, Ternary::DontCare, "R"),
    ];
    for record in &records {
        let [da, dv, ia, iv] = record.attributes();
        println!("  {}{}{}{}", da, dv, ia, iv);
    }

    let result = minimize(&records)?;
    println!("\nClosure under don't-care merging ({} patterns):", result.patterns.len());
    for pattern in &result.patterns {
        println!("  {}", pattern);
    }
    println!("\nAssigned signatures (fewest pinned conditions win):");
    for (record, pattern) in records.iter().zip(&result.assignments) {
        let [da, dv, ia, iv] = record.attributes();
        println!("  {}{}{}{} -> {}", da, dv, ia, iv, pattern);
    }

    // The same step as a whole-table pipeline, encoded as f_* columns.
    let csv = "\
Name,Da,Dv,Ia,Iv,Ops
a,0,0,,,R
b,0,,0,,R
";
    let table = Table::from_csv_string(csv)?;
    let out = minimized_table(&table)?;
    println!("\nTable form with encoded signature columns:");
    print!("{}", out.to_csv_string()?);

    Ok(())
}
