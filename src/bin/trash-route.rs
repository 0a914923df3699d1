use trash_route::orchestrator;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    orchestrator::run()
}
