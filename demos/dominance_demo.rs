//! Dominance filtering walkthrough

use faultsift::{dominance_workbook, CsvRead, CsvWrite, SignatureRule, Table};

fn main() -> Result<(), faultsift::SiftError> {
    println!("Fault-Record Dominance Filtering Example\n");

    let csv = "\
Name,Da,Dv,Ia,Iv,Ops
\"CIDC(1,0)\",0,0,0,0,\"W1, R1\"
\"CIDC(0,1)\",0,,0,,\"W1, R1\"
\"CIDC(x,x)\",,,,,\"W1, R1\"
SAF,1,1,1,1,R0
";

    println!("Input fault table:");
    println!("{}", csv);

    // CIDC(1,0) pins every condition the other CIDC records pin and shares
    // their operation-signature, so the less-specific records are dominated.
    let table = Table::from_csv_string(csv)?;
    let book = dominance_workbook(&table, SignatureRule::Exact)?;

    for sheet in book.sheets() {
        println!("{} ({} rows):", sheet.name, sheet.table.num_rows());
        print!("{}", sheet.table.to_csv_string()?);
        println!();
    }

    Ok(())
}
