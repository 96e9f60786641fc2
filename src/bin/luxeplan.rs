fn main() -> anyhow::Result<()> {
    luxeplan_vision::cli::run()
}
