//! Integration tests for the legacy XML-RPC transport and the RPC-backed
//! resources.

use magento_api::clients::{RpcClient, RpcError, RpcFault, RpcValue};
use magento_api::resources::{LinkType, ProductIdentifier};
use magento_api::{Credentials, Magento, MagentoConfig, ResourceError, RestClient, StoreUrl};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RPC_PATH: &str = "/index.php/api/xmlrpc/";

fn config_for(server: &MockServer) -> MagentoConfig {
    MagentoConfig::builder()
        .store_url(StoreUrl::new(server.uri()).unwrap())
        .credentials(Credentials::new("apiuser", "apikey").unwrap())
        .rpc_endpoint("index.php/api/xmlrpc/")
        .build()
        .unwrap()
}

fn xml_response(value: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(format!(
        "<?xml version=\"1.0\"?><methodResponse><params><param><value>{value}</value></param></params></methodResponse>"
    ))
}

fn fault_response(code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(format!(
        "<?xml version=\"1.0\"?><methodResponse><fault><value><struct>\
         <member><name>faultCode</name><value><int>{code}</int></value></member>\
         <member><name>faultString</name><value><string>{message}</string></value></member>\
         </struct></value></fault></methodResponse>"
    ))
}

async fn mount_login(server: &MockServer, session: &str) {
    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(body_string_contains("<methodName>login</methodName>"))
        .and(body_string_contains("<string>apiuser</string>"))
        .and(body_string_contains("<string>apikey</string>"))
        .respond_with(xml_response(&format!("<string>{session}</string>")))
        .expect(1)
        .mount(server)
        .await;
}

async fn logged_in_client(server: &MockServer) -> RpcClient {
    mount_login(server, "sess-1").await;
    let config = config_for(server);
    let mut client = RpcClient::new(&config).unwrap();
    client
        .login(config.credentials().unwrap())
        .await
        .unwrap();
    client
}

// ============================================================================
// Transport
// ============================================================================

#[test]
fn test_rpc_client_requires_endpoint() {
    let config = MagentoConfig::builder()
        .store_url(StoreUrl::new("https://shop.example.com").unwrap())
        .build()
        .unwrap();

    assert!(matches!(
        RpcClient::new(&config),
        Err(RpcError::NotConfigured)
    ));
}

#[tokio::test]
async fn test_call_before_login_is_rejected() {
    let server = MockServer::start().await;
    let client = RpcClient::new(&config_for(&server)).unwrap();

    let result = client.call("catalog_category.tree", vec![]).await;
    assert!(matches!(result, Err(RpcError::NotConnected)));
}

#[tokio::test]
async fn test_call_sends_session_method_and_args() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(header("Content-Type", "text/xml"))
        .and(body_string_contains("<methodName>call</methodName>"))
        .and(body_string_contains("<string>sess-1</string>"))
        .and(body_string_contains("<string>catalog_category.level</string>"))
        .respond_with(xml_response(
            "<array><data><value><struct>\
             <member><name>category_id</name><value><int>3</int></value></member>\
             <member><name>is_active</name><value><boolean>1</boolean></value></member>\
             </struct></value></data></array>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let result = client
        .call(
            "catalog_category.level",
            vec![RpcValue::Nil, RpcValue::from("default"), RpcValue::from(2_u64)],
        )
        .await
        .unwrap();

    assert_eq!(
        result.to_json(),
        json!([{"category_id": 3, "is_active": true}])
    );
}

#[tokio::test]
async fn test_fault_is_surfaced_with_code() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(body_string_contains("<methodName>call</methodName>"))
        .respond_with(fault_response(102, "Category not exists."))
        .mount(&server)
        .await;

    let error = client
        .call("catalog_category.info", vec![RpcValue::from(999_u64)])
        .await
        .unwrap_err();

    match error {
        RpcError::Fault(RpcFault { code, message }) => {
            assert_eq!(code, 102);
            assert_eq!(message, "Category not exists.");
        }
        other => panic!("Expected fault, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_login_leaves_client_disconnected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(body_string_contains("<methodName>login</methodName>"))
        .respond_with(fault_response(2, "Access denied."))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let mut client = RpcClient::new(&config).unwrap();
    let result = client.login(config.credentials().unwrap()).await;

    assert!(matches!(result, Err(RpcError::Fault(RpcFault { code: 2, .. }))));
    assert!(!client.is_connected());
}

#[tokio::test]
async fn test_multi_call_splits_per_entry_faults() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(body_string_contains("<methodName>multiCall</methodName>"))
        .and(body_string_contains("<string>catalog_product.info</string>"))
        .respond_with(xml_response(
            "<array><data>\
             <value><struct><member><name>sku</name><value><string>24-MB01</string></value></member></struct></value>\
             <value><struct>\
             <member><name>isFault</name><value><boolean>1</boolean></value></member>\
             <member><name>faultCode</name><value><int>101</int></value></member>\
             <member><name>faultMessage</name><value><string>Product not exists.</string></value></member>\
             </struct></value>\
             </data></array>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let results = client
        .multi_call(vec![
            (
                "catalog_product.info".to_string(),
                vec![RpcValue::from("24-MB01")],
            ),
            (
                "catalog_product.info".to_string(),
                vec![RpcValue::from("MISSING")],
            ),
        ])
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(
        results[0].as_ref().unwrap().to_json(),
        json!({"sku": "24-MB01"})
    );
    assert_eq!(
        results[1].as_ref().unwrap_err(),
        &RpcFault {
            code: 101,
            message: "Product not exists.".to_string()
        }
    );
}

// ============================================================================
// Resources over a connected facade
// ============================================================================

async fn connected(server: &MockServer) -> Magento {
    mount_login(server, "sess-7").await;
    let config = config_for(server);
    let mut rpc = RpcClient::new(&config).unwrap();
    rpc.login(config.credentials().unwrap()).await.unwrap();
    let rest = RestClient::new(&config, None).unwrap();
    Magento::new(rest, Some(rpc))
}

#[tokio::test]
async fn test_category_move_returns_bool() {
    let server = MockServer::start().await;
    let magento = connected(&server).await;

    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(body_string_contains("<string>catalog_category.move</string>"))
        .and(body_string_contains(
            "<value><int>12</int></value><value><int>3</int></value><value><nil/></value>",
        ))
        .respond_with(xml_response("<boolean>1</boolean>"))
        .expect(1)
        .mount(&server)
        .await;

    assert!(magento.categories().move_to(12, 3, None).await.unwrap());
}

#[tokio::test]
async fn test_product_link_assign_sends_identifier_type() {
    let server = MockServer::start().await;
    let magento = connected(&server).await;

    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(body_string_contains("<string>catalog_product_link.assign</string>"))
        .and(body_string_contains("<string>related</string>"))
        .and(body_string_contains("<string>24-MB01</string>"))
        .and(body_string_contains("<string>24-MB04</string>"))
        .and(body_string_contains("<string>sku</string>"))
        .respond_with(xml_response("<boolean>1</boolean>"))
        .expect(1)
        .mount(&server)
        .await;

    let assigned = magento
        .product_links()
        .assign(
            LinkType::Related,
            &ProductIdentifier::from("24-MB01"),
            &ProductIdentifier::from("24-MB04"),
            json!({"position": 1}),
        )
        .await
        .unwrap();
    assert!(assigned);
}

#[tokio::test]
async fn test_resource_fault_is_exposed() {
    let server = MockServer::start().await;
    let magento = connected(&server).await;

    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(body_string_contains("<string>catalog_product_attribute_tier_price.info</string>"))
        .respond_with(fault_response(101, "Product not exists."))
        .mount(&server)
        .await;

    let error = magento
        .product_tier_prices()
        .info(&ProductIdentifier::from(404_u64))
        .await
        .unwrap_err();

    assert!(matches!(error, ResourceError::Rpc(_)));
    assert_eq!(error.fault().map(|fault| fault.code), Some(101));
    assert_eq!(error.status(), None);
}
