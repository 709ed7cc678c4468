//! Legacy XML-RPC client.

use crate::clients::rpc::codec::{decode_response, encode_call};
use crate::clients::rpc::{RpcError, RpcFault, RpcValue};
use crate::clients::HttpClient;
use crate::config::{Credentials, MagentoConfig};

/// Client for Magento's legacy XML-RPC API.
///
/// The API is session based: [`login`](Self::login) opens a session, every
/// [`call`](Self::call) carries the session id, and
/// [`end_session`](Self::end_session) closes it.
///
/// # Thread Safety
///
/// `RpcClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use magento_api::{MagentoConfig, StoreUrl, Credentials};
/// use magento_api::clients::{RpcClient, RpcValue};
///
/// let config = MagentoConfig::builder()
///     .store_url(StoreUrl::new("https://shop.example.com").unwrap())
///     .rpc_endpoint("index.php/api/xmlrpc/")
///     .build()
///     .unwrap();
///
/// let mut rpc = RpcClient::new(&config)?;
/// rpc.login(&Credentials::new("apiuser", "apikey").unwrap()).await?;
///
/// let level = rpc.call("catalog_category.level", vec![RpcValue::Nil; 3]).await?;
/// rpc.end_session().await?;
/// ```
#[derive(Debug)]
pub struct RpcClient {
    http_client: HttpClient,
    endpoint: String,
    session_id: Option<String>,
}

// Verify RpcClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RpcClient>();
};

impl RpcClient {
    /// Creates a client for the configured RPC endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::NotConfigured`] if the configuration has no RPC
    /// endpoint, or [`RpcError::Http`] if the HTTP client cannot be created.
    pub fn new(config: &MagentoConfig) -> Result<Self, RpcError> {
        let endpoint = config.rpc_endpoint().ok_or(RpcError::NotConfigured)?;
        let http_client = HttpClient::new("", config)?;

        Ok(Self {
            http_client,
            endpoint: endpoint.to_string(),
            session_id: None,
        })
    }

    /// Returns the endpoint path, relative to the store URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the open session id, if any.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Returns `true` if a session is open.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.session_id.is_some()
    }

    /// Opens a session with an API user name and API key.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Fault`] if the server rejects the credentials and
    /// [`RpcError::MalformedResponse`] if it answers with something other
    /// than a session id.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<(), RpcError> {
        tracing::debug!("Opening RPC session for {}", credentials.username.as_ref());

        let session = self
            .invoke(
                "login",
                vec![
                    RpcValue::from(credentials.username.as_ref()),
                    RpcValue::from(credentials.password.as_ref()),
                ],
            )
            .await?;

        let session_id = match session {
            RpcValue::String(id) if !id.is_empty() => id,
            other => {
                return Err(RpcError::MalformedResponse {
                    reason: format!("expected a session id, got {other:?}"),
                })
            }
        };

        self.session_id = Some(session_id);
        Ok(())
    }

    /// Calls a resource method, e.g. `catalog_category.move`.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::NotConnected`] without a session and
    /// [`RpcError::Fault`] if the server answers with a fault.
    pub async fn call(&self, method: &str, args: Vec<RpcValue>) -> Result<RpcValue, RpcError> {
        let session = self.session()?;
        tracing::debug!("RPC call {}", method);

        self.invoke(
            "call",
            vec![
                RpcValue::from(session),
                RpcValue::from(method),
                RpcValue::Array(args),
            ],
        )
        .await
    }

    /// Calls several resource methods in one request.
    ///
    /// Each entry of the result is the value of the matching call, or the
    /// fault it raised. A fault in one entry does not fail the others.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::NotConnected`] without a session,
    /// [`RpcError::Fault`] if the whole request faults, and
    /// [`RpcError::MalformedResponse`] if the result is not an array.
    pub async fn multi_call(
        &self,
        calls: Vec<(String, Vec<RpcValue>)>,
    ) -> Result<Vec<Result<RpcValue, RpcFault>>, RpcError> {
        let session = self.session()?;
        tracing::debug!(
            "RPC multiCall: {}",
            calls
                .iter()
                .map(|(method, _)| method.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let batch = calls
            .into_iter()
            .map(|(method, args)| {
                RpcValue::Array(vec![RpcValue::String(method), RpcValue::Array(args)])
            })
            .collect();

        let result = self
            .invoke("multiCall", vec![RpcValue::from(session), RpcValue::Array(batch)])
            .await?;

        let RpcValue::Array(entries) = result else {
            return Err(RpcError::MalformedResponse {
                reason: format!("expected an array of multiCall results, got {result:?}"),
            });
        };

        Ok(entries.into_iter().map(split_fault).collect())
    }

    /// Ends the open session.
    ///
    /// The session is forgotten locally even if the server call fails.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::NotConnected`] without a session.
    pub async fn end_session(&mut self) -> Result<(), RpcError> {
        let session = self.session_id.take().ok_or(RpcError::NotConnected)?;
        tracing::debug!("Ending RPC session");

        self.invoke("endSession", vec![RpcValue::String(session)])
            .await?;
        Ok(())
    }

    fn session(&self) -> Result<&str, RpcError> {
        self.session_id.as_deref().ok_or(RpcError::NotConnected)
    }

    async fn invoke(&self, method: &str, params: Vec<RpcValue>) -> Result<RpcValue, RpcError> {
        let body = encode_call(method, &params);
        let text = self.http_client.post_xml(&self.endpoint, body).await?;
        decode_response(&text)
    }
}

/// Splits a `multiCall` entry into a value or the fault it carries.
fn split_fault(entry: RpcValue) -> Result<RpcValue, RpcFault> {
    if !entry.get("isFault").is_some_and(RpcValue::is_truthy) {
        return Ok(entry);
    }

    let fault = RpcFault {
        code: entry
            .get("faultCode")
            .and_then(RpcValue::as_i64)
            .unwrap_or_default(),
        message: entry
            .get("faultMessage")
            .or_else(|| entry.get("faultString"))
            .and_then(RpcValue::as_str)
            .unwrap_or_default()
            .to_string(),
    };
    tracing::warn!("multiCall entry failed: {}", fault);
    Err(fault)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreUrl;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(url: &str) -> MagentoConfig {
        MagentoConfig::builder()
            .store_url(StoreUrl::new(url).unwrap())
            .rpc_endpoint("index.php/api/xmlrpc/")
            .build()
            .unwrap()
    }

    fn xml_response(value: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_string(format!(
            "<?xml version=\"1.0\"?><methodResponse><params><param><value>{value}</value></param></params></methodResponse>"
        ))
    }

    async fn mount_login(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/index.php/api/xmlrpc/"))
            .and(body_string_contains("<methodName>login</methodName>"))
            .respond_with(xml_response("<string>sess-42</string>"))
            .mount(server)
            .await;
    }

    #[test]
    fn test_new_requires_rpc_endpoint() {
        let config = MagentoConfig::builder()
            .store_url(StoreUrl::new("https://shop.example.com").unwrap())
            .build()
            .unwrap();

        assert!(matches!(
            RpcClient::new(&config),
            Err(RpcError::NotConfigured)
        ));
    }

    #[test]
    fn test_split_fault() {
        let ok = RpcValue::from(serde_json::json!({"result": true}));
        assert_eq!(split_fault(ok.clone()), Ok(ok));

        let fault = RpcValue::from(serde_json::json!({
            "isFault": true,
            "faultCode": "101",
            "faultMessage": "Product not exists."
        }));
        assert_eq!(
            split_fault(fault),
            Err(RpcFault {
                code: 101,
                message: "Product not exists.".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_call_without_session_fails() {
        let client = RpcClient::new(&config_for("https://shop.example.com")).unwrap();
        let result = client.call("catalog_product.info", vec![]).await;
        assert!(matches!(result, Err(RpcError::NotConnected)));
    }

    #[tokio::test]
    async fn test_login_sends_credentials_and_stores_session() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/index.php/api/xmlrpc/"))
            .and(body_string_contains("<methodName>login</methodName>"))
            .and(body_string_contains("<string>apiuser</string>"))
            .and(body_string_contains("<string>apikey</string>"))
            .respond_with(xml_response("<string>sess-42</string>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut client = RpcClient::new(&config_for(&mock_server.uri())).unwrap();
        client
            .login(&Credentials::new("apiuser", "apikey").unwrap())
            .await
            .unwrap();

        assert_eq!(client.session_id(), Some("sess-42"));
        assert!(client.is_connected());
    }

    #[tokio::test]
    async fn test_call_wraps_session_method_and_args() {
        let mock_server = MockServer::start().await;
        mount_login(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/index.php/api/xmlrpc/"))
            .and(body_string_contains(
                "<methodName>call</methodName><params>\
                 <param><value><string>sess-42</string></value></param>\
                 <param><value><string>catalog_category.currentStore</string></value></param>\
                 <param><value><array><data><value><string>default</string></value></data></array></value></param>",
            ))
            .respond_with(xml_response("<int>1</int>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut client = RpcClient::new(&config_for(&mock_server.uri())).unwrap();
        client
            .login(&Credentials::new("apiuser", "apikey").unwrap())
            .await
            .unwrap();

        let value = client
            .call("catalog_category.currentStore", vec![RpcValue::from("default")])
            .await
            .unwrap();
        assert_eq!(value, RpcValue::Int(1));
    }

    #[tokio::test]
    async fn test_fault_response_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/index.php/api/xmlrpc/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<?xml version=\"1.0\"?><methodResponse><fault><value><struct>\
                 <member><name>faultCode</name><value><int>2</int></value></member>\
                 <member><name>faultString</name><value><string>Access denied.</string></value></member>\
                 </struct></value></fault></methodResponse>",
            ))
            .mount(&mock_server)
            .await;

        let mut client = RpcClient::new(&config_for(&mock_server.uri())).unwrap();
        let result = client
            .login(&Credentials::new("apiuser", "wrong").unwrap())
            .await;

        match result {
            Err(RpcError::Fault(fault)) => assert_eq!(fault.code, 2),
            other => panic!("Expected fault, got {other:?}"),
        }
        assert!(!client.is_connected());
    }

    #[tokio::test]
    async fn test_multi_call_splits_entry_faults() {
        let mock_server = MockServer::start().await;
        mount_login(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/index.php/api/xmlrpc/"))
            .and(body_string_contains("<methodName>multiCall</methodName>"))
            .and(body_string_contains(
                "<value><array><data><value><string>cataloginventory_stock_item.update</string></value>",
            ))
            .respond_with(xml_response(
                "<array><data>\
                 <value><boolean>1</boolean></value>\
                 <value><struct>\
                   <member><name>isFault</name><value><boolean>1</boolean></value></member>\
                   <member><name>faultCode</name><value><string>101</string></value></member>\
                   <member><name>faultMessage</name><value><string>Product not exists.</string></value></member>\
                 </struct></value>\
                 </data></array>",
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut client = RpcClient::new(&config_for(&mock_server.uri())).unwrap();
        client
            .login(&Credentials::new("apiuser", "apikey").unwrap())
            .await
            .unwrap();

        let results = client
            .multi_call(vec![
                (
                    "cataloginventory_stock_item.update".to_string(),
                    vec![RpcValue::from("sku-1"), RpcValue::from(serde_json::json!({"qty": 1}))],
                ),
                (
                    "cataloginventory_stock_item.update".to_string(),
                    vec![RpcValue::from("missing"), RpcValue::from(serde_json::json!({"qty": 2}))],
                ),
            ])
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0], Ok(RpcValue::Bool(true)));
        assert_eq!(
            results[1],
            Err(RpcFault {
                code: 101,
                message: "Product not exists.".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_end_session_clears_session() {
        let mock_server = MockServer::start().await;
        mount_login(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/index.php/api/xmlrpc/"))
            .and(body_string_contains("<methodName>endSession</methodName>"))
            .and(body_string_contains("<string>sess-42</string>"))
            .respond_with(xml_response("<boolean>1</boolean>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut client = RpcClient::new(&config_for(&mock_server.uri())).unwrap();
        client
            .login(&Credentials::new("apiuser", "apikey").unwrap())
            .await
            .unwrap();
        client.end_session().await.unwrap();

        assert!(!client.is_connected());
        assert!(matches!(
            client.end_session().await,
            Err(RpcError::NotConnected)
        ));
    }
}
