use gorus::Demo;

fn main() -> anyhow::Result<()> {
    gorus::run(Demo::torus())
}
