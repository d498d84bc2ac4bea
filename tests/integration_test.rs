// file: tests/integration_test.rs
// version: 2.0.0
// guid: z6a7b8c9-d0e1-2345-6789-012345zabcde

//! Integration tests for the command adapter against stub collaborators

use clap::Parser;
use ec2_cmd::{
    cli::{dispatch, Cli, Commands, InvocationOptions},
    commands::{find_descriptor, ALL_DESCRIPTORS},
    host::{ConfirmationHost, ConfirmationPrompt},
    transport::{Ec2Transport, QueryParams, ServiceError, TransportError, TransportResult},
    CommandAdapter, Ec2CmdError, Outcome, Result,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Records every call and answers with a fixed document or error.
struct RecordingTransport {
    reply: Reply,
    calls: Mutex<Vec<(String, QueryParams)>>,
}

enum Reply {
    Body(String),
    NameResolution,
    Service(ServiceError),
    Hang,
}

impl RecordingTransport {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, QueryParams)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Ec2Transport for RecordingTransport {
    async fn send(&self, action: &str, params: &QueryParams) -> TransportResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push((action.to_string(), params.clone()));

        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::NameResolution => Err(TransportError::NameResolution {
                endpoint: "https://ec2.nowhere-1.amazonaws.com".to_string(),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "dns error: failed to lookup address information: Name or service not known",
                )),
            }),
            Reply::Service(err) => Err(TransportError::Service(err.clone())),
            Reply::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

/// Answers every prompt the same way and counts them.
#[derive(Clone)]
struct ScriptedHost {
    answer: bool,
    prompts: Arc<AtomicUsize>,
}

impl ScriptedHost {
    fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

impl ConfirmationHost for ScriptedHost {
    fn confirm(&self, _prompt: &ConfirmationPrompt) -> Result<bool> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer)
    }
}

/// One command with the arguments it needs, a sample response body and the
/// value its default selector must produce.
struct Case {
    command: &'static str,
    args: &'static [&'static str],
    body: &'static str,
    expected: &'static str,
}

const CASES: &[Case] = &[
    Case {
        command: "disable-ebs-encryption-by-default",
        args: &[],
        body: "<ebsEncryptionByDefault>false</ebsEncryptionByDefault>",
        expected: "false",
    },
    Case {
        command: "enable-ebs-encryption-by-default",
        args: &[],
        body: "<ebsEncryptionByDefault>true</ebsEncryptionByDefault>",
        expected: "true",
    },
    Case {
        command: "get-ebs-encryption-by-default",
        args: &[],
        body: "<ebsEncryptionByDefault>true</ebsEncryptionByDefault><sseType>sse-ebs</sseType>",
        expected: "true",
    },
    Case {
        command: "get-ebs-default-kms-key-id",
        args: &[],
        body: "<kmsKeyId>alias/aws/ebs</kmsKeyId>",
        expected: r#""alias/aws/ebs""#,
    },
    Case {
        command: "modify-ebs-default-kms-key-id",
        args: &["--kms-key-id", "alias/ops"],
        body: "<kmsKeyId>arn:aws:kms:us-east-1:123456789012:alias/ops</kmsKeyId>",
        expected: r#""arn:aws:kms:us-east-1:123456789012:alias/ops""#,
    },
    Case {
        command: "reset-ebs-default-kms-key-id",
        args: &[],
        body: "<kmsKeyId>alias/aws/ebs</kmsKeyId>",
        expected: r#""alias/aws/ebs""#,
    },
    Case {
        command: "disable-serial-console-access",
        args: &[],
        body: "<serialConsoleAccessEnabled>false</serialConsoleAccessEnabled>",
        expected: "false",
    },
    Case {
        command: "enable-serial-console-access",
        args: &[],
        body: "<serialConsoleAccessEnabled>true</serialConsoleAccessEnabled>",
        expected: "true",
    },
    Case {
        command: "get-serial-console-access-status",
        args: &[],
        body: "<serialConsoleAccessEnabled>true</serialConsoleAccessEnabled><managedBy>account</managedBy>",
        expected: "true",
    },
    Case {
        command: "disable-image-block-public-access",
        args: &[],
        body: "<imageBlockPublicAccessState>unblocked</imageBlockPublicAccessState>",
        expected: r#""unblocked""#,
    },
    Case {
        command: "enable-image-block-public-access",
        args: &[],
        body: "<imageBlockPublicAccessState>block-new-sharing</imageBlockPublicAccessState>",
        expected: r#""block-new-sharing""#,
    },
    Case {
        command: "get-image-block-public-access-state",
        args: &[],
        body: "<imageBlockPublicAccessState>block-new-sharing</imageBlockPublicAccessState><managedBy>account</managedBy>",
        expected: r#""block-new-sharing""#,
    },
    Case {
        command: "disable-snapshot-block-public-access",
        args: &[],
        body: "<state>unblocked</state>",
        expected: r#""unblocked""#,
    },
    Case {
        command: "enable-snapshot-block-public-access",
        args: &["--state", "block-all-sharing"],
        body: "<state>block-all-sharing</state>",
        expected: r#""block-all-sharing""#,
    },
    Case {
        command: "get-snapshot-block-public-access-state",
        args: &[],
        body: "<state>block-new-sharing</state>",
        expected: r#""block-new-sharing""#,
    },
    Case {
        command: "disable-allowed-images-settings",
        args: &[],
        body: "<allowedImagesSettingsState>disabled</allowedImagesSettingsState>",
        expected: r#""disabled""#,
    },
    Case {
        command: "enable-allowed-images-settings",
        args: &["--allowed-images-settings-state", "enabled"],
        body: "<allowedImagesSettingsState>enabled</allowedImagesSettingsState>",
        expected: r#""enabled""#,
    },
    Case {
        command: "get-allowed-images-settings",
        args: &[],
        body: "<state>enabled</state><imageCriterionSet><item><imageProviderSet><item>amazon</item></imageProviderSet></item></imageCriterionSet><managedBy>account</managedBy>",
        expected: r#"{"State":"enabled","ImageCriteria":[{"ImageProviders":["amazon"]}],"ManagedBy":"account"}"#,
    },
    Case {
        command: "get-instance-metadata-defaults",
        args: &[],
        body: "<accountLevel><httpTokens>required</httpTokens><httpPutResponseHopLimit>2</httpPutResponseHopLimit></accountLevel>",
        expected: r#"{"HttpTokens":"required","HttpPutResponseHopLimit":2,"HttpEndpoint":null,"InstanceMetadataTags":null}"#,
    },
    Case {
        command: "modify-instance-metadata-defaults",
        args: &["--http-tokens", "required"],
        body: "<return>true</return>",
        expected: "true",
    },
    Case {
        command: "create-key-pair",
        args: &["--key-name", "ops"],
        body: "<keyName>ops</keyName><keyFingerprint>fp</keyFingerprint><keyMaterial>PRIVATE</keyMaterial><keyPairId>key-1</keyPairId>",
        expected: r#"{"KeyName":"ops","KeyFingerprint":"fp","KeyMaterial":"PRIVATE","KeyPairId":"key-1","Tags":[]}"#,
    },
    Case {
        command: "delete-key-pair",
        args: &["--key-name", "ops"],
        body: "<return>true</return><keyPairId>key-1</keyPairId>",
        expected: r#"{"Return":true,"KeyPairId":"key-1"}"#,
    },
    Case {
        command: "describe-key-pairs",
        args: &[],
        body: "<keySet><item><keyPairId>key-1</keyPairId><keyType>rsa</keyType><keyName>ops</keyName><keyFingerprint>fp</keyFingerprint></item></keySet>",
        expected: r#"[{"KeyPairId":"key-1","KeyType":"rsa","Tags":[],"KeyName":"ops","KeyFingerprint":"fp","CreateTime":null}]"#,
    },
];

fn document(action: &str, inner: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <{action}Response xmlns=\"http://ec2.amazonaws.com/doc/2016-11-15/\">\
         <requestId>59dbff89-35bd-4eac-99ed-be587EXAMPLE</requestId>{inner}</{action}Response>",
        action = action,
        inner = inner
    )
}

fn parse(command: &str, args: &[&str]) -> Commands {
    let mut argv = vec!["ec2cmd", command];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap().command
}

fn action_of(command: &str) -> &'static str {
    find_descriptor(command).unwrap().action
}

fn adapter_for(case: &Case, host: ScriptedHost) -> CommandAdapter<RecordingTransport, ScriptedHost> {
    let body = document(action_of(case.command), case.body);
    CommandAdapter::new(RecordingTransport::new(Reply::Body(body)), host)
}

fn options() -> InvocationOptions {
    InvocationOptions::default()
}

fn forced() -> InvocationOptions {
    InvocationOptions {
        force: true,
        ..InvocationOptions::default()
    }
}

#[test]
fn test_cases_cover_every_command() {
    assert_eq!(CASES.len(), ALL_DESCRIPTORS.len());
    for descriptor in ALL_DESCRIPTORS {
        assert!(
            CASES.iter().any(|c| c.command == descriptor.command),
            "no case for {}",
            descriptor
        );
    }
}

#[tokio::test]
async fn test_declined_mutations_never_reach_transport() {
    for case in CASES {
        if !find_descriptor(case.command).unwrap().is_mutating() {
            continue;
        }
        let host = ScriptedHost::new(false);
        let adapter = adapter_for(case, host.clone());

        let outcome = dispatch(&adapter, parse(case.command, case.args), &options())
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Declined, "{}", case.command);
        assert_eq!(host.prompts(), 1, "{}", case.command);
        assert!(adapter.transport().calls().is_empty(), "{}", case.command);
    }
}

#[tokio::test]
async fn test_forced_mutations_send_exactly_once_without_prompt() {
    for case in CASES {
        if !find_descriptor(case.command).unwrap().is_mutating() {
            continue;
        }
        let host = ScriptedHost::new(false);
        let adapter = adapter_for(case, host.clone());

        let outcome = dispatch(&adapter, parse(case.command, case.args), &forced())
            .await
            .unwrap();

        assert!(matches!(outcome, Outcome::Completed(_)), "{}", case.command);
        assert_eq!(host.prompts(), 0, "{}", case.command);
        let calls = adapter.transport().calls();
        assert_eq!(calls.len(), 1, "{}", case.command);
        assert_eq!(calls[0].0, action_of(case.command));
    }
}

#[tokio::test]
async fn test_read_only_commands_never_prompt() {
    for case in CASES {
        if find_descriptor(case.command).unwrap().is_mutating() {
            continue;
        }
        let host = ScriptedHost::new(false);
        let adapter = adapter_for(case, host.clone());

        dispatch(&adapter, parse(case.command, case.args), &options())
            .await
            .unwrap();

        assert_eq!(host.prompts(), 0, "{}", case.command);
        assert_eq!(adapter.transport().calls().len(), 1, "{}", case.command);
    }
}

#[tokio::test]
async fn test_default_selectors_project_documented_field() {
    for case in CASES {
        let adapter = adapter_for(case, ScriptedHost::new(true));
        let expected: Value = serde_json::from_str(case.expected).unwrap();

        let outcome = dispatch(&adapter, parse(case.command, case.args), &forced())
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Completed(expected), "{}", case.command);
    }
}

#[tokio::test]
async fn test_star_returns_whole_response() {
    let case = CASES
        .iter()
        .find(|c| c.command == "get-serial-console-access-status")
        .unwrap();
    let adapter = adapter_for(case, ScriptedHost::new(true));
    let opts = InvocationOptions {
        selector: Some("*".to_string()),
        ..options()
    };

    let outcome = dispatch(&adapter, parse(case.command, case.args), &opts)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Completed(json!({"SerialConsoleAccessEnabled": true, "ManagedBy": "account"}))
    );
}

#[tokio::test]
async fn test_param_selector_echoes_bound_value() {
    let case = CASES.iter().find(|c| c.command == "delete-key-pair").unwrap();
    let adapter = adapter_for(case, ScriptedHost::new(true));
    let opts = InvocationOptions {
        selector: Some("^KeyName".to_string()),
        force: true,
        ..options()
    };

    let outcome = dispatch(&adapter, parse(case.command, case.args), &opts)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Completed(json!("ops")));
    assert_eq!(adapter.transport().calls().len(), 1);
}

#[tokio::test]
async fn test_invalid_selector_is_reported_before_any_call() {
    let case = CASES
        .iter()
        .find(|c| c.command == "enable-serial-console-access")
        .unwrap();
    let host = ScriptedHost::new(true);
    let adapter = adapter_for(case, host.clone());
    let opts = InvocationOptions {
        selector: Some("^KeyName".to_string()),
        ..options()
    };

    let err = dispatch(&adapter, parse(case.command, case.args), &opts)
        .await
        .unwrap_err();

    assert!(matches!(err, Ec2CmdError::InvalidSelector { .. }));
    assert_eq!(host.prompts(), 0);
    assert!(adapter.transport().calls().is_empty());
}

#[tokio::test]
async fn test_name_resolution_failure_is_clarified() {
    let adapter = CommandAdapter::new(
        RecordingTransport::new(Reply::NameResolution),
        ScriptedHost::new(true),
    );

    let err = dispatch(
        &adapter,
        parse("get-ebs-encryption-by-default", &[]),
        &options(),
    )
    .await
    .unwrap_err();

    let message = err.to_string();
    assert!(matches!(err, Ec2CmdError::EndpointUnresolved { .. }));
    assert!(message.contains("Name resolution failure"));
    assert!(message.contains("ec2.nowhere-1.amazonaws.com"));
    assert!(!message.contains("dns error"));
    assert_eq!(adapter.transport().calls().len(), 1);
}

#[tokio::test]
async fn test_service_errors_propagate_as_is() {
    let adapter = CommandAdapter::new(
        RecordingTransport::new(Reply::Service(ServiceError::new(
            "InvalidKeyPair.NotFound",
            "The key pair 'ops' does not exist",
            400,
        ))),
        ScriptedHost::new(true),
    );

    let err = dispatch(&adapter, parse("delete-key-pair", &["--key-name", "ops"]), &forced())
        .await
        .unwrap_err();

    assert!(matches!(err, Ec2CmdError::Transport(TransportError::Service(_))));
    assert!(err.to_string().contains("InvalidKeyPair.NotFound"));
    assert_eq!(adapter.transport().calls().len(), 1);
}

#[tokio::test]
async fn test_cancelling_in_flight_call_does_not_hang() {
    let adapter = CommandAdapter::new(RecordingTransport::new(Reply::Hang), ScriptedHost::new(true));
    let cancel = CancellationToken::new();
    let opts = InvocationOptions {
        cancel: cancel.clone(),
        ..options()
    };

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        dispatch(&adapter, parse("describe-key-pairs", &[]), &opts),
    )
    .await
    .expect("cancelled invocation must not block");

    let err = result.unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(adapter.transport().calls().len(), 1);
}

#[tokio::test]
async fn test_delete_without_key_is_rejected_before_prompt() {
    let host = ScriptedHost::new(true);
    let adapter = CommandAdapter::new(
        RecordingTransport::new(Reply::Body(String::new())),
        host.clone(),
    );

    let err = dispatch(&adapter, parse("delete-key-pair", &[]), &options())
        .await
        .unwrap_err();

    assert!(matches!(err, Ec2CmdError::InvalidArgument(_)));
    assert_eq!(host.prompts(), 0);
    assert!(adapter.transport().calls().is_empty());
}

#[tokio::test]
async fn test_confirmation_disabled_in_settings_acts_as_force() {
    let case = CASES
        .iter()
        .find(|c| c.command == "reset-ebs-default-kms-key-id")
        .unwrap();
    let host = ScriptedHost::new(false);
    let adapter = adapter_for(case, host.clone()).with_confirm_mutations(false);

    let outcome = dispatch(&adapter, parse(case.command, case.args), &options())
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Completed(json!("alias/aws/ebs")));
    assert_eq!(host.prompts(), 0);
}

#[tokio::test]
async fn test_what_if_describes_without_calling() {
    let case = CASES.iter().find(|c| c.command == "create-key-pair").unwrap();
    let host = ScriptedHost::new(true);
    let adapter = adapter_for(case, host.clone());
    let opts = InvocationOptions {
        what_if: true,
        ..options()
    };

    let outcome = dispatch(&adapter, parse(case.command, case.args), &opts)
        .await
        .unwrap();

    match outcome {
        Outcome::WhatIf(text) => {
            assert!(text.starts_with("What if:"));
            assert!(text.contains("create-key-pair (CreateKeyPair)"));
            assert!(text.contains("\"ops\""));
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(host.prompts(), 0);
    assert!(adapter.transport().calls().is_empty());
}

#[tokio::test]
async fn test_request_parameters_reach_transport() {
    let case = CASES
        .iter()
        .find(|c| c.command == "modify-instance-metadata-defaults")
        .unwrap();
    let adapter = adapter_for(case, ScriptedHost::new(true));
    let command = parse(
        case.command,
        &["--http-tokens", "required", "--instance-metadata-tags", "enabled"],
    );

    dispatch(&adapter, command, &forced()).await.unwrap();

    let calls = adapter.transport().calls();
    assert_eq!(calls[0].0, "ModifyInstanceMetadataDefaults");
    assert_eq!(calls[0].1["HttpTokens"], "required");
    assert_eq!(calls[0].1["InstanceMetadataTags"], "enabled");
    assert!(!calls[0].1.contains_key("HttpEndpoint"));
}

/// A "disable" command against a stub answering `state = disabled` yields
/// `"disabled"` from one recorded call.
#[tokio::test]
async fn test_disable_setting_example() {
    let body = document("DisableSnapshotBlockPublicAccess", "<state>disabled</state>");
    let adapter = CommandAdapter::new(
        RecordingTransport::new(Reply::Body(body)),
        ScriptedHost::new(false),
    );

    let outcome = dispatch(
        &adapter,
        parse("disable-snapshot-block-public-access", &[]),
        &forced(),
    )
    .await
    .unwrap();

    assert_eq!(outcome, Outcome::Completed(json!("disabled")));
    assert_eq!(adapter.transport().calls().len(), 1);
}
