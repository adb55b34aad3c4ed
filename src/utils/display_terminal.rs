//! 부팅 진행 상황 터미널 출력

const BOX_WIDTH: usize = 50;

pub fn print_boxed_title(title: &str) {
    let border = "═".repeat(BOX_WIDTH);
    println!("╔{}╗", border);
    println!("║{:^width$}║", title, width = BOX_WIDTH);
    println!("╚{}╝", border);
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

pub fn print_final_summary(repositories: usize, services: usize) {
    println!();
    print_boxed_title("SERVICE REGISTRY READY");
    println!("   Repositories: {}", repositories);
    println!("   Services:     {}", services);
    println!("   Total:        {}", repositories + services);
    println!();
}

pub fn print_cache_initialized(kind: &str, count: usize) {
    println!("   ├─ {} registrations indexed: {}", kind, count);
}
