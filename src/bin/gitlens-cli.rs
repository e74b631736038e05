use ide_bridge::cli;
use ide_bridge::domain::BridgeVariant;

fn main() {
    std::process::exit(cli::run(BridgeVariant::GitLensCli));
}
