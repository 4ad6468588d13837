fn main() -> Result<(), Box<dyn std::error::Error>> {
    autoimpl::build!();

    Ok(())
}
