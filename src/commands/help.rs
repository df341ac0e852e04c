pub const HELP_TEXT: &str = "\
📖 coin-forecast commands
  <asset id>             Train a model for the asset, chart its last 7 days and forecast the next day
  list [filter] [page]   Browse the asset catalog (matches id or name)
  help                   Show this help message
  quit                   Exit";

pub fn execute() {
    println!("{}", HELP_TEXT);
}
