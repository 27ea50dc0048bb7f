use std::fs;

use anyhow::Result;
use pagein_core::SymbolOrder;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn generates_deduplicated_order_file() -> Result<()> {
    let dir = tempdir()?;
    let raw = dir.path().join("launch_symbols.txt");
    let order_file = dir.path().join("app.order");

    fs::write(
        &raw,
        "A\n[OrderFile] hook installed\nB\nA\n\nC\nB\n",
    )?;

    let order = SymbolOrder::from_path(&raw)?;
    assert_eq!(order.symbols(), ["A", "B", "C"]);

    order.write_to(&order_file)?;
    assert_eq!(fs::read_to_string(&order_file)?, "A\nB\nC\n");
    Ok(())
}

#[test]
fn running_on_its_own_output_is_idempotent() -> Result<()> {
    let dir = tempdir()?;
    let raw = dir.path().join("raw.txt");
    let first = dir.path().join("first.order");
    let second = dir.path().join("second.order");

    fs::write(&raw, "_main\n+[AppDelegate load]\n_main\n-[HomeViewController viewDidLoad]\n")?;

    SymbolOrder::from_path(&raw)?.write_to(&first)?;
    SymbolOrder::from_path(&first)?.write_to(&second)?;

    assert_eq!(fs::read_to_string(&first)?, fs::read_to_string(&second)?);
    Ok(())
}

#[test]
fn blank_and_log_only_input_yields_an_empty_order_file() -> Result<()> {
    let dir = tempdir()?;
    let raw = dir.path().join("raw.txt");
    let order_file = dir.path().join("app.order");

    fs::write(&raw, "\n   \n[OrderFile] nothing recorded yet\n\n")?;

    let order = SymbolOrder::from_path(&raw)?;
    assert!(order.is_empty());

    order.write_to(&order_file)?;
    assert!(order_file.exists());
    assert_eq!(fs::read_to_string(&order_file)?, "");
    Ok(())
}

#[test]
fn missing_raw_file_is_an_error_before_anything_is_written() -> Result<()> {
    let dir = tempdir()?;
    let raw = dir.path().join("does_not_exist.txt");
    let order_file = dir.path().join("app.order");

    let err = SymbolOrder::from_path(&raw).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
    // The reader failed, so the destination is never touched.
    assert!(!order_file.exists());
    Ok(())
}
