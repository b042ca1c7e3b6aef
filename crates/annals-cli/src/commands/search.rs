//! `annals search ...`

use annals_core::{
  search::{self, SearchQuery},
  store::RecordStore,
};
use clap::Args;

use super::Ctx;

#[derive(Args, Debug)]
pub struct SearchArgs {
  /// Exact tag to require.
  #[arg(long, default_value = "")]
  pub tag:          String,
  /// Exact condemnation label to require.
  #[arg(long, default_value = "")]
  pub condemnation: String,
  /// Free text; matched against description, date and condemnation notes.
  pub text:         Vec<String>,
}

pub async fn run(ctx: &Ctx, args: SearchArgs) -> anyhow::Result<()> {
  let query = SearchQuery {
    text:         args.text.join(" "),
    tag:          args.tag,
    condemnation: args.condemnation,
  };
  if query.is_empty() {
    anyhow::bail!("give some text, --tag or --condemnation");
  }

  let events = ctx.store.list_events().await?;
  let results = search::search(&events, &query);
  for e in &results {
    println!("{:>5}  {:<10}  {}", e.id.0, e.date, e.description);
  }
  eprintln!("{} result(s)", results.len());
  Ok(())
}
