//! The six end-to-end scenarios from spec.md §8, built against the
//! in-memory compilation/project-graph fixtures.

use pretty_assertions::assert_eq;

use logging_usage_extractor::model::{
    ConstantOrReference, EventIdBinding, Finding, IssueKind, LogLevel, ScalarValue,
};
use logging_usage_extractor::registry;
use logging_usage_extractor::semantic::model::{InMemoryCompilation, InMemoryProjectGraph};
use logging_usage_extractor::semantic::{
    Argument, AttributeArg, AttributeData, InvocationOperation, MethodDeclarationNode, MethodSymbol,
    Operation, ParameterSymbol, PropertySymbol, RawCallSite, SyntaxNode, SyntaxTree, TypeSymbol, Visibility,
};
use logging_usage_extractor::{extract, ExtractionConfig};
use logging_usage_extractor::model::SourceLocation;

fn param(name: &str, type_display: &str) -> ParameterSymbol {
    ParameterSymbol {
        name: name.to_string(),
        type_display: type_display.to_string(),
        type_symbol: None,
        attributes: vec![],
        is_nullable: false,
    }
}

fn extension_method(name: &str, params: Vec<ParameterSymbol>) -> MethodSymbol {
    MethodSymbol {
        name: name.to_string(),
        containing_type_fqn: registry::LOGGER_INTERFACE.to_string(),
        is_static: false,
        is_extension: true,
        visibility: Visibility::Public,
        return_type_display: None,
        parameters: params,
    }
}

#[test]
fn scenario_1_simple_extension_call() {
    let method = extension_method("LogInformation", vec![param("message", "string")]);
    let invocation = InvocationOperation {
        method,
        instance: None,
        type_arguments: vec![],
        arguments: vec![Argument {
            name: None,
            value: Operation::Literal(ScalarValue::Str("Test message".into())),
        }],
        location: SourceLocation::new("Program.cs", 10, 5),
    };
    let tree = SyntaxTree::new("Program.cs", vec![SyntaxNode::Invocation(invocation)]);
    let compilation = InMemoryCompilation::new()
        .with_known_type_name(registry::LOGGER_INTERFACE)
        .with_tree(tree);

    let result = extract(&compilation, None, None, None, &ExtractionConfig::default());

    assert_eq!(result.findings.len(), 1);
    match &result.findings[0] {
        Finding::ExtensionCall { header } => {
            assert_eq!(header.method_name, "LogInformation");
            assert_eq!(header.log_level, Some(LogLevel::Information));
            assert_eq!(header.message_template.as_deref(), Some("Test message"));
            assert!(header.message_parameters.is_empty());
        }
        other => panic!("expected ExtensionCall, got {other:?}"),
    }
}

#[test]
fn scenario_2_compile_time_attribute_with_cross_project_call_site() {
    let attr = AttributeData {
        name: registry::LOGGER_MESSAGE_ATTRIBUTE.to_string(),
        base_types: vec![],
        positional_args: vec![],
        named_args: vec![
            ("EventId".to_string(), AttributeArg::Int(1)),
            ("Level".to_string(), AttributeArg::EnumMember("Information".to_string())),
            ("Message".to_string(), AttributeArg::Str("User {UserId} logged in".to_string())),
        ],
    };
    let method = MethodSymbol {
        name: "LogUserLogin".to_string(),
        containing_type_fqn: "MyApp.Logging".to_string(),
        is_static: true,
        is_extension: false,
        visibility: Visibility::Internal,
        return_type_display: None,
        parameters: vec![param("logger", registry::LOGGER_INTERFACE), param("UserId", "int")],
    };
    let decl = MethodDeclarationNode {
        method: method.clone(),
        is_partial: true,
        attributes: vec![attr],
        declaring_type_fqn: "MyApp.Logging".to_string(),
        location: SourceLocation::new("Logging.cs", 5, 5),
    };
    let tree = SyntaxTree::new("Logging.cs", vec![SyntaxNode::MethodDeclaration(decl)]);
    let compilation = InMemoryCompilation::new()
        .with_known_type_name(registry::LOGGER_INTERFACE)
        .with_known_type_name(registry::LOGGER_MESSAGE_ATTRIBUTE)
        .with_tree(tree)
        .with_method("MyApp.Logging", method.clone());

    let project_graph = InMemoryProjectGraph::new().with_call_site(
        "MyApp.Logging",
        "LogUserLogin",
        RawCallSite {
            project_name: "Caller.Project".to_string(),
            containing_type_fqn: "Other.Caller".to_string(),
            location: SourceLocation::new("Caller.cs", 20, 3),
            arguments: vec![Argument {
                name: None,
                value: Operation::Literal(ScalarValue::Int(42)),
            }],
        },
    );

    let result = extract(&compilation, Some(&project_graph), None, None, &ExtractionConfig::default());

    assert_eq!(result.findings.len(), 1);
    match &result.findings[0] {
        Finding::CompileTimeAttribute {
            header,
            log_properties_parameters,
            invocations,
            ..
        } => {
            assert_eq!(
                header.event_id,
                Some(EventIdBinding::Inline {
                    id: ConstantOrReference::Constant(ScalarValue::Int(1)),
                    name: ConstantOrReference::missing(),
                })
            );
            assert_eq!(header.log_level, Some(LogLevel::Information));
            assert_eq!(header.message_template.as_deref(), Some("User {UserId} logged in"));
            assert_eq!(header.message_parameters.len(), 1);
            assert_eq!(header.message_parameters[0].name, "UserId");
            assert_eq!(header.message_parameters[0].type_display, "int");
            assert!(log_properties_parameters.is_empty());
            assert_eq!(invocations.len(), 1);
        }
        other => panic!("expected CompileTimeAttribute, got {other:?}"),
    }
}

#[test]
fn scenario_3_delegate_factory_define() {
    let method = MethodSymbol {
        name: "Define".to_string(),
        containing_type_fqn: registry::LOGGER_MESSAGE_DEFINE_TYPE.to_string(),
        is_static: true,
        is_extension: false,
        visibility: Visibility::Public,
        return_type_display: Some("Action<ILogger,string,int,Exception>".to_string()),
        parameters: vec![],
    };
    let invocation = InvocationOperation {
        method,
        instance: None,
        type_arguments: vec!["string".to_string(), "int".to_string()],
        arguments: vec![
            Argument {
                name: None,
                value: Operation::EnumMember("Information".to_string()),
            },
            Argument {
                name: None,
                value: Operation::ObjectCreation {
                    type_display: registry::EVENT_ID_STRUCT.to_string(),
                    arguments: vec![
                        Argument {
                            name: None,
                            value: Operation::Literal(ScalarValue::Int(100)),
                        },
                        Argument {
                            name: None,
                            value: Operation::Literal(ScalarValue::Str("UserCreated".to_string())),
                        },
                    ],
                },
            },
            Argument {
                name: None,
                value: Operation::Literal(ScalarValue::Str("User {Name} id {Id}".to_string())),
            },
        ],
        location: SourceLocation::new("Logs.cs", 1, 1),
    };
    let tree = SyntaxTree::new("Logs.cs", vec![SyntaxNode::Invocation(invocation)]);
    let compilation = InMemoryCompilation::new()
        .with_known_type_name(registry::LOGGER_INTERFACE)
        .with_known_type_name(registry::LOGGER_MESSAGE_DEFINE_TYPE)
        .with_tree(tree);

    let result = extract(&compilation, None, None, None, &ExtractionConfig::default());

    assert_eq!(result.findings.len(), 1);
    match &result.findings[0] {
        Finding::DelegateFactory { header } => {
            assert_eq!(header.log_level, Some(LogLevel::Information));
            assert_eq!(
                header.event_id,
                Some(EventIdBinding::Inline {
                    id: ConstantOrReference::Constant(ScalarValue::Int(100)),
                    name: ConstantOrReference::Constant(ScalarValue::Str("UserCreated".to_string())),
                })
            );
            assert_eq!(header.message_template.as_deref(), Some("User {Name} id {Id}"));
            let names: Vec<&str> = header.message_parameters.iter().map(|p| p.name.as_str()).collect();
            let types: Vec<&str> = header.message_parameters.iter().map(|p| p.type_display.as_str()).collect();
            assert_eq!(names, vec!["Name", "Id"]);
            assert_eq!(types, vec!["string", "int"]);
        }
        other => panic!("expected DelegateFactory, got {other:?}"),
    }
}

#[test]
fn scenario_4_cross_call_site_inconsistency() {
    let method = extension_method(
        "LogInformation",
        vec![param("message", "string"), param("args", "object[]")],
    );
    let warning_method = extension_method(
        "LogWarning",
        vec![param("message", "string"), param("args", "object[]")],
    );

    let call_one = InvocationOperation {
        method,
        instance: None,
        type_arguments: vec![],
        arguments: vec![
            Argument {
                name: None,
                value: Operation::Literal(ScalarValue::Str("User {userId}".to_string())),
            },
            Argument {
                name: None,
                value: Operation::Literal(ScalarValue::Int(1)),
            },
        ],
        location: SourceLocation::new("A.cs", 1, 1),
    };
    let call_two = InvocationOperation {
        method: warning_method,
        instance: None,
        type_arguments: vec![],
        arguments: vec![
            Argument {
                name: None,
                value: Operation::Literal(ScalarValue::Str("User {UserId}".to_string())),
            },
            Argument {
                name: None,
                value: Operation::Literal(ScalarValue::Str("a".to_string())),
            },
        ],
        location: SourceLocation::new("A.cs", 2, 1),
    };

    let tree = SyntaxTree::new(
        "A.cs",
        vec![SyntaxNode::Invocation(call_one), SyntaxNode::Invocation(call_two)],
    );
    let compilation = InMemoryCompilation::new()
        .with_known_type_name(registry::LOGGER_INTERFACE)
        .with_tree(tree);

    let result = extract(&compilation, None, None, None, &ExtractionConfig::default());

    assert_eq!(result.findings.len(), 2);
    assert_eq!(result.summary.inconsistency_groups.len(), 1);
    let group = &result.summary.inconsistency_groups[0];
    assert!(group.issue_kinds.contains(&IssueKind::TypeMismatch));
    assert!(group.issue_kinds.contains(&IssueKind::CasingDifference));
    let mut pairs = group.names_with_types.clone();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![("UserId".to_string(), "string".to_string()), ("userId".to_string(), "int".to_string())]
    );
}

#[test]
fn scenario_5_transitive_log_properties_breaks_cycles() {
    let node_stub = TypeSymbol::scalar("Node");
    let node_type = TypeSymbol {
        fqn: "Node".to_string(),
        is_nullable: false,
        is_collection: false,
        element_type: None,
        base_types: vec![],
        properties: vec![
            PropertySymbol {
                name: "Parent".to_string(),
                type_display: "Node".to_string(),
                type_symbol: Some(node_stub.clone()),
                attributes: vec![],
                is_nullable: true,
            },
            PropertySymbol {
                name: "Child".to_string(),
                type_display: "Node".to_string(),
                type_symbol: Some(node_stub),
                attributes: vec![],
                is_nullable: true,
            },
            PropertySymbol {
                name: "Name".to_string(),
                type_display: "string".to_string(),
                type_symbol: None,
                attributes: vec![],
                is_nullable: false,
            },
        ],
    };

    let log_properties_attr = AttributeData {
        name: registry::LOG_PROPERTIES_ATTRIBUTE.to_string(),
        base_types: vec![],
        positional_args: vec![],
        named_args: vec![("Transitive".to_string(), AttributeArg::Bool(true))],
    };
    let node_param = ParameterSymbol {
        name: "node".to_string(),
        type_display: "Node".to_string(),
        type_symbol: Some(node_type),
        attributes: vec![log_properties_attr],
        is_nullable: false,
    };
    let method = MethodSymbol {
        name: "LogNode".to_string(),
        containing_type_fqn: "MyApp.Logging".to_string(),
        is_static: true,
        is_extension: false,
        visibility: Visibility::Public,
        return_type_display: None,
        parameters: vec![node_param],
    };
    let decl = MethodDeclarationNode {
        method: method.clone(),
        is_partial: true,
        attributes: vec![AttributeData {
            name: registry::LOGGER_MESSAGE_ATTRIBUTE.to_string(),
            base_types: vec![],
            positional_args: vec![],
            named_args: vec![("Message".to_string(), AttributeArg::Str("Node logged".to_string()))],
        }],
        declaring_type_fqn: "MyApp.Logging".to_string(),
        location: SourceLocation::new("Node.cs", 1, 1),
    };
    let tree = SyntaxTree::new("Node.cs", vec![SyntaxNode::MethodDeclaration(decl)]);
    let compilation = InMemoryCompilation::new()
        .with_known_type_name(registry::LOGGER_INTERFACE)
        .with_known_type_name(registry::LOGGER_MESSAGE_ATTRIBUTE)
        .with_known_type_name(registry::LOG_PROPERTIES_ATTRIBUTE)
        .with_tree(tree)
        .with_method("MyApp.Logging", method);

    let result = extract(&compilation, None, None, None, &ExtractionConfig::default());

    assert_eq!(result.findings.len(), 1);
    match &result.findings[0] {
        Finding::CompileTimeAttribute { log_properties_parameters, .. } => {
            assert_eq!(log_properties_parameters.len(), 1);
            let properties = &log_properties_parameters[0].properties;
            assert_eq!(properties.len(), 3);
            let parent = properties.iter().find(|p| p.original_name == "Parent").unwrap();
            let child = properties.iter().find(|p| p.original_name == "Child").unwrap();
            let name = properties.iter().find(|p| p.original_name == "Name").unwrap();
            assert!(parent.nested.is_none());
            assert!(child.nested.is_none());
            assert!(name.nested.is_none());
        }
        other => panic!("expected CompileTimeAttribute, got {other:?}"),
    }
}

#[test]
fn scenario_6_instance_tag_provider_method_is_invalid() {
    let provider_method = MethodSymbol {
        name: "Provide".to_string(),
        containing_type_fqn: "MyApp.Providers".to_string(),
        is_static: false,
        is_extension: false,
        visibility: Visibility::Public,
        return_type_display: None,
        parameters: vec![
            param("collector", registry::TAG_COLLECTOR_INTERFACE),
            param("value", "MyApp.Request"),
        ],
    };

    let tag_provider_attr = AttributeData {
        name: registry::TAG_PROVIDER_ATTRIBUTE.to_string(),
        base_types: vec![],
        positional_args: vec![
            AttributeArg::Str("MyApp.Providers".to_string()),
            AttributeArg::Str("Provide".to_string()),
        ],
        named_args: vec![],
    };
    let log_properties_attr = AttributeData {
        name: registry::LOG_PROPERTIES_ATTRIBUTE.to_string(),
        base_types: vec![],
        positional_args: vec![],
        named_args: vec![],
    };
    let request_param = ParameterSymbol {
        name: "request".to_string(),
        type_display: "MyApp.Request".to_string(),
        type_symbol: Some(TypeSymbol::scalar("MyApp.Request")),
        attributes: vec![tag_provider_attr, log_properties_attr],
        is_nullable: false,
    };
    let method = MethodSymbol {
        name: "LogRequest".to_string(),
        containing_type_fqn: "MyApp.Logging".to_string(),
        is_static: true,
        is_extension: false,
        visibility: Visibility::Public,
        return_type_display: None,
        parameters: vec![request_param],
    };
    let decl = MethodDeclarationNode {
        method: method.clone(),
        is_partial: true,
        attributes: vec![AttributeData {
            name: registry::LOGGER_MESSAGE_ATTRIBUTE.to_string(),
            base_types: vec![],
            positional_args: vec![],
            named_args: vec![("Message".to_string(), AttributeArg::Str("Request logged".to_string()))],
        }],
        declaring_type_fqn: "MyApp.Logging".to_string(),
        location: SourceLocation::new("Req.cs", 1, 1),
    };
    let tree = SyntaxTree::new("Req.cs", vec![SyntaxNode::MethodDeclaration(decl)]);
    let compilation = InMemoryCompilation::new()
        .with_known_type_name(registry::LOGGER_INTERFACE)
        .with_known_type_name(registry::LOGGER_MESSAGE_ATTRIBUTE)
        .with_known_type_name(registry::LOG_PROPERTIES_ATTRIBUTE)
        .with_known_type_name(registry::TAG_PROVIDER_ATTRIBUTE)
        .with_known_type_name(registry::TAG_COLLECTOR_INTERFACE)
        .with_tree(tree)
        .with_method("MyApp.Logging", method)
        .with_method("MyApp.Providers", provider_method);

    let result = extract(&compilation, None, None, None, &ExtractionConfig::default());

    match &result.findings[0] {
        Finding::CompileTimeAttribute { log_properties_parameters, .. } => {
            let tag_provider = log_properties_parameters[0].tag_provider.as_ref().unwrap();
            assert!(!tag_provider.is_valid);
            assert!(tag_provider.validation_message.as_deref().unwrap().contains("must be static"));
        }
        other => panic!("expected CompileTimeAttribute, got {other:?}"),
    }
}

/// spec.md §7 kind 5: a `ProjectGraph` whose lookup fails is swallowed and
/// logged — invocations stay empty rather than propagating the error.
#[test]
fn cross_project_finder_failure_leaves_invocations_empty() {
    let method = MethodSymbol {
        name: "LogUserLogin".to_string(),
        containing_type_fqn: "MyApp.Logging".to_string(),
        is_static: true,
        is_extension: false,
        visibility: Visibility::Internal,
        return_type_display: None,
        parameters: vec![param("logger", registry::LOGGER_INTERFACE)],
    };
    let decl = MethodDeclarationNode {
        method: method.clone(),
        is_partial: true,
        attributes: vec![AttributeData {
            name: registry::LOGGER_MESSAGE_ATTRIBUTE.to_string(),
            base_types: vec![],
            positional_args: vec![],
            named_args: vec![("Message".to_string(), AttributeArg::Str("logged in".to_string()))],
        }],
        declaring_type_fqn: "MyApp.Logging".to_string(),
        location: SourceLocation::new("Logging.cs", 5, 5),
    };
    let tree = SyntaxTree::new("Logging.cs", vec![SyntaxNode::MethodDeclaration(decl)]);
    let compilation = InMemoryCompilation::new()
        .with_known_type_name(registry::LOGGER_INTERFACE)
        .with_known_type_name(registry::LOGGER_MESSAGE_ATTRIBUTE)
        .with_tree(tree)
        .with_method("MyApp.Logging", method);

    let project_graph = InMemoryProjectGraph::failing();

    let result = extract(&compilation, Some(&project_graph), None, None, &ExtractionConfig::default());

    assert_eq!(result.findings.len(), 1);
    match &result.findings[0] {
        Finding::CompileTimeAttribute { invocations, .. } => {
            assert!(invocations.is_empty());
        }
        other => panic!("expected CompileTimeAttribute, got {other:?}"),
    }
}

/// spec.md §4.4.5: `[TagName]`/`[DataClassification]` on a plain message
/// parameter populate `ParameterBinding::custom_tag_name`/`data_classification`.
#[test]
fn compile_time_attribute_parameter_carries_tag_name_and_data_classification() {
    const SENSITIVE_DATA_ATTRIBUTE: &str = "MyApp.Compliance.SensitiveDataAttribute";

    let tagged_param = ParameterSymbol {
        name: "userId".to_string(),
        type_display: "int".to_string(),
        type_symbol: None,
        attributes: vec![
            AttributeData {
                name: registry::TAG_NAME_ATTRIBUTE.to_string(),
                base_types: vec![],
                positional_args: vec![AttributeArg::Str("traceId".to_string())],
                named_args: vec![],
            },
            AttributeData {
                name: SENSITIVE_DATA_ATTRIBUTE.to_string(),
                base_types: vec![registry::DATA_CLASSIFICATION_BASE_ATTRIBUTE.to_string()],
                positional_args: vec![],
                named_args: vec![],
            },
        ],
        is_nullable: false,
    };
    let method = MethodSymbol {
        name: "LogUser".to_string(),
        containing_type_fqn: "MyApp.Logging".to_string(),
        is_static: true,
        is_extension: false,
        visibility: Visibility::Public,
        return_type_display: None,
        parameters: vec![tagged_param],
    };
    let decl = MethodDeclarationNode {
        method: method.clone(),
        is_partial: true,
        attributes: vec![AttributeData {
            name: registry::LOGGER_MESSAGE_ATTRIBUTE.to_string(),
            base_types: vec![],
            positional_args: vec![],
            named_args: vec![("Message".to_string(), AttributeArg::Str("User {userId}".to_string()))],
        }],
        declaring_type_fqn: "MyApp.Logging".to_string(),
        location: SourceLocation::new("Logging.cs", 1, 1),
    };
    let tree = SyntaxTree::new("Logging.cs", vec![SyntaxNode::MethodDeclaration(decl)]);
    let compilation = InMemoryCompilation::new()
        .with_known_type_name(registry::LOGGER_INTERFACE)
        .with_known_type_name(registry::LOGGER_MESSAGE_ATTRIBUTE)
        .with_known_type_name(registry::TAG_NAME_ATTRIBUTE)
        .with_known_type_name(registry::DATA_CLASSIFICATION_BASE_ATTRIBUTE)
        .with_tree(tree)
        .with_method("MyApp.Logging", method);

    let result = extract(&compilation, None, None, None, &ExtractionConfig::default());

    assert_eq!(result.findings.len(), 1);
    match &result.findings[0] {
        Finding::CompileTimeAttribute { header, .. } => {
            assert_eq!(header.message_parameters.len(), 1);
            let binding = &header.message_parameters[0];
            assert_eq!(binding.custom_tag_name.as_deref(), Some("traceId"));
            assert_eq!(binding.data_classification.as_deref(), Some(SENSITIVE_DATA_ATTRIBUTE));
        }
        other => panic!("expected CompileTimeAttribute, got {other:?}"),
    }
}
