#[tokio::main]
async fn main() {
    if let Err(e) = menu_planner_lib::run().await {
        eprintln!("menu-planner: {}", e);
        std::process::exit(1);
    }
}
