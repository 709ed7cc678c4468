//! Shared mock-server setup for endpoint tests.

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::auth::AccessToken;
use crate::clients::{RestClient, RpcClient};
use crate::config::{Credentials, MagentoConfig, StoreUrl};

pub const RPC_PATH: &str = "/index.php/api/xmlrpc/";

pub fn config_for(server: &MockServer) -> MagentoConfig {
    MagentoConfig::builder()
        .store_url(StoreUrl::new(&server.uri()).unwrap())
        .rpc_endpoint("index.php/api/xmlrpc/")
        .build()
        .unwrap()
}

pub fn rest_client(server: &MockServer) -> RestClient {
    RestClient::new(
        &config_for(server),
        Some(AccessToken::new("test-token").unwrap()),
    )
    .unwrap()
}

pub fn xml_response(value: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(format!(
        "<?xml version=\"1.0\"?><methodResponse><params><param><value>{value}</value></param></params></methodResponse>"
    ))
}

/// Returns an RPC client logged in with session `sess-1`.
pub async fn rpc_client(server: &MockServer) -> RpcClient {
    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(body_string_contains("<methodName>login</methodName>"))
        .respond_with(xml_response("<string>sess-1</string>"))
        .mount(server)
        .await;

    let mut client = RpcClient::new(&config_for(server)).unwrap();
    client
        .login(&Credentials::new("apiuser", "apikey").unwrap())
        .await
        .unwrap();
    client
}

/// Mounts a `call` handler for `rpc_method` whose body contains every
/// fragment, answering with `value`.
pub async fn mount_call(server: &MockServer, rpc_method: &str, fragments: &[&str], value: &str) {
    let mut mock = Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(body_string_contains("<methodName>call</methodName>"))
        .and(body_string_contains(format!("<string>{rpc_method}</string>")));
    for fragment in fragments {
        mock = mock.and(body_string_contains(*fragment));
    }
    mock.respond_with(xml_response(value))
        .expect(1)
        .mount(server)
        .await;
}
