fn main() -> anyhow::Result<()> {
    saywhat_rust::run()
}
