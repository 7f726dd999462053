use anyhow::Result;

use crate::config::Config;

pub fn handle_get_command(key: String) -> Result<()> {
    let config = Config::load()?;
    match config.get(&key) {
        Some(value) => println!("{value}"),
        None => println!("(not set)"),
    }
    Ok(())
}

pub fn handle_set_command(key: String, value: String) -> Result<()> {
    let mut config = Config::load()?;
    config.set(&key, value)?;
    config.save()?;
    println!("Saved {key}");
    Ok(())
}

pub fn handle_unset_command(key: String) -> Result<()> {
    let mut config = Config::load()?;
    config.unset(&key)?;
    config.save()?;
    println!("Removed {key}");
    Ok(())
}

pub fn handle_list_command() -> Result<()> {
    let config = Config::load()?;
    let items = config.list();

    if items.is_empty() {
        println!("No config values set");
        return Ok(());
    }

    for (key, value) in items {
        println!("{key} = {value}");
    }
    Ok(())
}
