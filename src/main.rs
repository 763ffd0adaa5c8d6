use tower_lsp::Server;
use vuesp::{create_service, logging};

#[tokio::main]
async fn main() {
    logging::init();

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = create_service();
    Server::new(stdin, stdout, socket).serve(service).await;
}
