use snatch::xboard;

fn main() {
    // Protocol traffic owns stdout; logging goes to stderr.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    xboard::run();
}
