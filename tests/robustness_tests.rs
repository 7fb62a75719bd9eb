mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use common::drafts_csv;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_malformed_rows_are_skipped() {
    let file = drafts_csv(&[
        "1,1,msp_cashondelivery,,5.00,4.50,,",
        "abc,1,msp_cashondelivery,,5.00,4.50,,",
        "2,1,msp_cashondelivery,,not_a_number,4.50,,",
        "3,1,msp_cashondelivery,,2.00,2.00,,",
    ]);

    let mut cmd = Command::new(cargo_bin!("cod-fee-tax"));
    cmd.arg(file.path())
        .arg("--config")
        .arg("tests/fixtures/tax.toml");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading draft"))
        .stdout(predicate::str::contains("1,applied,5,4.5,6,5.4,1,0.9,1,0.9"))
        .stdout(predicate::str::contains("3,applied,2,2,2.4,2.4,0.4,0.4,0.4,0.4"))
        .stdout(predicate::str::contains("2,applied").not());
}

#[test]
fn test_short_rows_read_missing_columns_as_empty() {
    let file = drafts_csv(&["1,1,msp_cashondelivery"]);

    let mut cmd = Command::new(cargo_bin!("cod-fee-tax"));
    cmd.arg(file.path())
        .arg("--config")
        .arg("tests/fixtures/tax.toml");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,no_fee,,,,,,,0,0"));
}
