use tabula_cli::TabulaCli;

fn main() -> anyhow::Result<()> {
    TabulaCli::new().parse_and_run()
}
