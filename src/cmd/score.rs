use super::AppSession;
use clap::Args;
use yams::catalog::Category;
use yams::validator::{self, Validation};
use yams::YamsResult;

#[derive(Args, Debug, Clone)]
pub struct EnterArgs {
    /// Player id or name
    pub player: String,

    /// Category key, e.g. `fours` or `fullHouse`
    pub category: Category,

    /// Digits only, anything else is dropped. Leave empty to clear the cell
    #[arg(default_value = "", allow_hyphen_values = true)]
    pub value: String,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    pub category: Category,

    #[arg(allow_negative_numbers = true)]
    pub value: Option<f64>,
}

#[derive(Args, Debug, Clone)]
pub struct BlockArgs {
    pub player: String,
    pub category: Category,
}

fn describe(category: Category, outcome: &Validation) -> String {
    match (outcome.valid, outcome.normalized) {
        (_, None) => format!("{} cleared", category.label()),
        (true, Some(v)) => format!("✅ {} = {}", category.label(), v),
        (false, Some(v)) => format!(
            "⚠️  {} only accepts {}, corrected to {}",
            category.label(),
            category.hint(),
            v
        ),
    }
}

pub fn enter(args: &EnterArgs, session: &mut AppSession) -> YamsResult<()> {
    let id = session.player_id(&args.player)?;
    let raw = validator::parse_entry(&args.value).map(f64::from);

    match session.commit_score(&id, args.category, raw)? {
        Some(outcome) => println!("{}", describe(args.category, &outcome)),
        None => println!("🔒 {} is blocked", args.category.label()),
    }

    let totals = session.totals(&id);
    println!(
        "   upper {} | bonus {} | lower {} | total {}",
        totals.upper, totals.bonus, totals.lower, totals.total
    );
    Ok(())
}

pub fn check(args: &CheckArgs) {
    let outcome = validator::validate(args.category, args.value);
    println!("{}", describe(args.category, &outcome));
}

pub fn block(args: &BlockArgs, session: &mut AppSession) -> YamsResult<()> {
    let id = session.player_id(&args.player)?;
    if session.toggle_block(&id, args.category)? {
        println!("🔒 {} blocked", args.category.label());
    } else {
        println!("🔓 {} unblocked", args.category.label());
    }
    Ok(())
}
