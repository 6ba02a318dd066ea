fn main() -> anyhow::Result<()> {
    gitsim::cli::run()
}
