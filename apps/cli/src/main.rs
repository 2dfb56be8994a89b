fn main() -> anyhow::Result<()> {
    timeline_drill::run()
}
