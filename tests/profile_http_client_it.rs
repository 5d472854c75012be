// self
use cognito_profile::{
	_preludet::*,
	auth::{OAuth2Info, ProviderId},
	error::{ConfigError, ProfileError, TransportError},
	http::{ProfileHttpClient, ResponseMetadata, ResponseMetadataSlot},
	oauth::{
		TransportErrorMapper,
		oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse, http::StatusCode},
	},
	profile::{CommonSocialProfile, LoginInfo},
	provider::{CognitoProvider, Settings, SocialProvider},
};

type FakeProvider = CognitoProvider<FakeHttpClient, RecordingTransportErrorMapper>;

#[derive(Debug)]
enum FakeTransportError {
	ConnectionRefused,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::ConnectionRefused => write!(f, "Connection refused."),
		}
	}
}
impl StdError for FakeTransportError {}

#[derive(Clone, Debug)]
struct RecordedRequest {
	method: String,
	uri: String,
	authorization: Option<String>,
}

#[derive(Clone)]
enum FakeReply {
	Body { status: u16, body: String },
	Refused,
}

#[derive(Clone)]
struct FakeHttpClient {
	reply: FakeReply,
	requests: Arc<Mutex<Vec<RecordedRequest>>>,
}
impl FakeHttpClient {
	fn replying(status: u16, body: &str) -> Self {
		Self {
			reply: FakeReply::Body { status, body: body.to_owned() },
			requests: Default::default(),
		}
	}

	fn refusing() -> Self {
		Self { reply: FakeReply::Refused, requests: Default::default() }
	}

	fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.lock().clone()
	}
}
impl ProfileHttpClient for FakeHttpClient {
	type Handle = FakeHttpHandle;
	type TransportError = FakeTransportError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		FakeHttpHandle { slot, reply: self.reply.clone(), requests: Arc::clone(&self.requests) }
	}
}

struct FakeHttpHandle {
	slot: ResponseMetadataSlot,
	reply: FakeReply,
	requests: Arc<Mutex<Vec<RecordedRequest>>>,
}
impl<'a> AsyncHttpClient<'a> for FakeHttpHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future = Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send>>;

	fn call(&'a self, request: HttpRequest) -> Self::Future {
		let slot = self.slot.clone();
		let reply = self.reply.clone();
		let requests = Arc::clone(&self.requests);

		Box::pin(async move {
			assert!(
				slot.take().is_none(),
				"ResponseMetadataSlot must be clear before dispatching a request."
			);

			requests.lock().push(RecordedRequest {
				method: request.method().to_string(),
				uri: request.uri().to_string(),
				authorization: request
					.headers()
					.get("authorization")
					.and_then(|value| value.to_str().ok())
					.map(str::to_owned),
			});

			match reply {
				FakeReply::Body { status, body } => {
					slot.store(ResponseMetadata { status: Some(status) });

					let mut response = HttpResponse::new(body.into_bytes());

					*response.status_mut() =
						StatusCode::from_u16(status).expect("Fake status code should be valid.");

					Ok(response)
				},
				FakeReply::Refused =>
					Err(HttpClientError::Reqwest(Box::new(FakeTransportError::ConnectionRefused))),
			}
		})
	}
}

#[derive(Clone, Default)]
struct RecordingTransportErrorMapper {
	metadata: Arc<Mutex<Vec<Option<ResponseMetadata>>>>,
}
impl RecordingTransportErrorMapper {
	fn recorded_metadata(&self) -> Vec<Option<ResponseMetadata>> {
		self.metadata.lock().clone()
	}
}
impl TransportErrorMapper<FakeTransportError> for RecordingTransportErrorMapper {
	fn map_transport_error(
		&self,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<FakeTransportError>,
	) -> Error {
		self.metadata.lock().push(meta.cloned());

		match err {
			HttpClientError::Reqwest(inner) => TransportError::network(*inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			other => TransportError::Other {
				message: format!("{other:?}"),
				status: meta.and_then(|value| value.status),
			}
			.into(),
		}
	}
}

fn build_provider(
	settings: Settings,
	client: &FakeHttpClient,
	mapper: &RecordingTransportErrorMapper,
) -> FakeProvider {
	CognitoProvider::with_http_client(settings, client.clone(), mapper.clone())
}

fn cognito() -> ProviderId {
	ProviderId::new("cognito").expect("Provider identifier fixture should be valid.")
}

#[tokio::test]
async fn builds_profile_from_default_endpoint() {
	let client = FakeHttpClient::replying(200, r#"{"username":"jdoe","email":"j@x.com"}"#);
	let mapper = RecordingTransportErrorMapper::default();
	let provider = build_provider(Settings::with_domain_name("acme"), &client, &mapper);
	let profile = provider
		.build_profile(&OAuth2Info::new("abc123"))
		.await
		.expect("Profile should be built from a success payload.");

	assert_eq!(
		profile,
		CommonSocialProfile {
			login_info: LoginInfo::new(cognito(), "jdoe"),
			first_name: None,
			last_name: None,
			full_name: Some("jdoe".into()),
			email: Some("j@x.com".into()),
		}
	);

	let requests = client.requests();

	assert_eq!(requests.len(), 1, "Exactly one outbound request must be issued.");
	assert_eq!(requests[0].method, "GET");
	assert_eq!(requests[0].uri, "https://acme.auth.eu-central-1.amazoncognito.com/oauth2/userInfo");
	assert_eq!(requests[0].authorization.as_deref(), Some("Bearer abc123"));
	assert!(mapper.recorded_metadata().is_empty());
}

#[tokio::test]
async fn provider_error_object_becomes_retrieval_failure() {
	for status in [200, 401] {
		let client = FakeHttpClient::replying(
			status,
			r#"{"error":{"message":"bad token","type":"invalid_request","code":401}}"#,
		);
		let mapper = RecordingTransportErrorMapper::default();
		let provider = build_provider(Settings::with_domain_name("acme"), &client, &mapper);
		let err = provider
			.build_profile(&OAuth2Info::new("abc123"))
			.await
			.expect_err("Error payloads must never produce a profile.");

		assert!(matches!(err, Error::Profile(ProfileError::Retrieval { code: 401, .. })));
		assert_eq!(
			err.to_string(),
			"[cognito] Error retrieving profile information. Error message: bad token, type: invalid_request, code: 401"
		);
		assert_eq!(client.requests().len(), 1);
	}
}

#[tokio::test]
async fn incomplete_error_object_reports_parse_path() {
	let client =
		FakeHttpClient::replying(400, r#"{"error":{"message":"bad token","type":"invalid"}}"#);
	let mapper = RecordingTransportErrorMapper::default();
	let provider = build_provider(Settings::with_domain_name("acme"), &client, &mapper);
	let err = provider
		.build_profile(&OAuth2Info::new("abc123"))
		.await
		.expect_err("Incomplete error payloads must fail.");

	match err {
		Error::Profile(ProfileError::Parse { source, .. }) => {
			assert_eq!(source.path().to_string(), "error");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn missing_domain_name_fails_before_any_request() {
	let client = FakeHttpClient::replying(200, r#"{"username":"jdoe"}"#);
	let mapper = RecordingTransportErrorMapper::default();
	let provider = build_provider(Settings::default(), &client, &mapper);
	let err = provider
		.build_profile(&OAuth2Info::new("abc123"))
		.await
		.expect_err("Settings without a domain name must fail.");

	assert!(matches!(
		err,
		Error::Config(ConfigError::MissingCustomProperty { key: "domainName" })
	));
	assert!(client.requests().is_empty(), "No request may be sent without a domain name.");
}

#[tokio::test]
async fn missing_username_is_a_parse_failure() {
	let client = FakeHttpClient::replying(200, r#"{"email":"j@x.com"}"#);
	let mapper = RecordingTransportErrorMapper::default();
	let provider = build_provider(Settings::with_domain_name("acme"), &client, &mapper);
	let err = provider
		.build_profile(&OAuth2Info::new("abc123"))
		.await
		.expect_err("A success payload without username must fail.");

	assert!(matches!(err, Error::Profile(ProfileError::Parse { .. })));
}

#[tokio::test]
async fn transport_failures_flow_through_mapper() {
	let client = FakeHttpClient::refusing();
	let mapper = RecordingTransportErrorMapper::default();
	let provider = build_provider(Settings::with_domain_name("acme"), &client, &mapper);
	let err = provider
		.build_profile(&OAuth2Info::new("abc123"))
		.await
		.expect_err("Refused connections must surface to the caller.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	assert_eq!(client.requests().len(), 1, "Failures must not be retried.");

	let observed = mapper.recorded_metadata();

	assert_eq!(observed.len(), 1, "Mapper must record a single failure.");
	assert!(observed[0].is_none(), "No status is known for a refused connection.");
}

#[tokio::test]
async fn status_without_error_object_is_a_transport_failure() {
	let cases = [
		(502, "<html>Bad Gateway</html>"),
		(401, r#"{"error":"invalid_token","error_description":"Access token has expired"}"#),
	];

	for (status, body) in cases {
		let client = FakeHttpClient::replying(status, body);
		let mapper = RecordingTransportErrorMapper::default();
		let provider = build_provider(Settings::with_domain_name("acme"), &client, &mapper);
		let err = provider
			.build_profile(&OAuth2Info::new("abc123"))
			.await
			.expect_err("Non-success statuses must fail.");

		match err {
			Error::Transport(TransportError::UnexpectedStatus { status: got, body_preview }) => {
				assert_eq!(got, status);
				assert_eq!(body_preview, body);
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}
}

#[tokio::test]
async fn non_json_success_body_is_malformed() {
	let client = FakeHttpClient::replying(200, "not json");
	let mapper = RecordingTransportErrorMapper::default();
	let provider = build_provider(Settings::with_domain_name("acme"), &client, &mapper);
	let err = provider
		.build_profile(&OAuth2Info::new("abc123"))
		.await
		.expect_err("Non-JSON bodies must fail.");

	assert!(matches!(err, Error::Profile(ProfileError::MalformedBody { status: 200, .. })));
}

#[tokio::test]
async fn with_settings_rebinds_without_touching_original() {
	let client = FakeHttpClient::replying(200, r#"{"username":"jdoe"}"#);
	let mapper = RecordingTransportErrorMapper::default();
	let original = build_provider(Settings::default(), &client, &mapper);
	let rebound = original.with_settings(|settings| {
		settings.clone().with_custom_property(Settings::DOMAIN_NAME_KEY, "globex")
	});

	assert_eq!(original.settings(), &Settings::default());
	assert_eq!(rebound.settings(), &Settings::with_domain_name("globex"));
	assert!(Arc::ptr_eq(&original.http_client, &rebound.http_client));

	rebound
		.build_profile(&OAuth2Info::new("abc123"))
		.await
		.expect("Rebound provider should resolve its endpoint.");
	original
		.build_profile(&OAuth2Info::new("abc123"))
		.await
		.expect_err("Original provider must keep its settings.");

	let requests = client.requests();

	assert_eq!(requests.len(), 1);
	assert_eq!(
		requests[0].uri,
		"https://globex.auth.eu-central-1.amazoncognito.com/oauth2/userInfo"
	);
}

#[tokio::test]
async fn concurrent_builds_do_not_share_settings() {
	let client = FakeHttpClient::replying(200, r#"{"username":"jdoe"}"#);
	let mapper = RecordingTransportErrorMapper::default();
	let acme = build_provider(Settings::with_domain_name("acme"), &client, &mapper);
	let initech = acme.with_settings(|_| {
		Settings::with_domain_name("initech").with_api_url("https://%s.example.com/userInfo")
	});
	let acme_info = OAuth2Info::new("acme-token");
	let initech_info = OAuth2Info::new("initech-token");
	let (first, second) =
		tokio::join!(acme.build_profile(&acme_info), initech.build_profile(&initech_info));

	first.expect("First concurrent build should succeed.");
	second.expect("Second concurrent build should succeed.");

	let mut seen = client
		.requests()
		.into_iter()
		.map(|request| (request.uri, request.authorization.unwrap_or_default()))
		.collect::<Vec<_>>();

	seen.sort();

	assert_eq!(
		seen,
		vec![
			(
				"https://acme.auth.eu-central-1.amazoncognito.com/oauth2/userInfo".to_owned(),
				"Bearer acme-token".to_owned(),
			),
			("https://initech.example.com/userInfo".to_owned(), "Bearer initech-token".to_owned()),
		]
	);
}
