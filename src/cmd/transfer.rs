use super::AppSession;
use clap::Args;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use yams::transfer;
use yams::YamsResult;

#[derive(Args, Debug, Clone)]
pub struct FileArgs {
    pub file: PathBuf,
}

pub fn export(args: &FileArgs, session: &AppSession) -> YamsResult<()> {
    let json = session.export_json()?;
    fs::write(&args.file, json)?;
    println!("💾 Exported to {}", args.file.display());
    Ok(())
}

pub fn import(args: &FileArgs, session: &mut AppSession) -> YamsResult<()> {
    let json = fs::read_to_string(&args.file)?;
    session.import_json(&json)?;
    println!(
        "📥 Imported {} player(s) and {} round(s)",
        session.scores().players().len(),
        session.archive().len()
    );
    Ok(())
}

pub fn export_csv(args: &FileArgs, session: &AppSession) -> YamsResult<()> {
    let file = File::create(&args.file)?;
    transfer::write_rounds_csv(session.scores(), session.archive(), BufWriter::new(file))?;
    println!(
        "📄 Wrote {} round(s) to {}",
        session.archive().len(),
        args.file.display()
    );
    Ok(())
}
