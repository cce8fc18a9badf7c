fn main() {
    brandi_cli::logging::init();
    let code = brandi_cli::run(std::env::args(), &mut std::io::stdout(), &mut std::io::stderr());
    std::process::exit(code);
}
