use super::*;
use crate::{DerivedKeys, Interface, MethodDecl};
use lingo_types::{Component, Message};
use pretty_assertions::assert_eq;

fn messages() -> Arc<Interface> {
    Interface::builder("Messages")
        .method(
            MethodDecl::new("helloWorld")
                .param("name", TypeDesc::string())
                .key("hello.world"),
        )
        .method(MethodDecl::new("errors").returns(TypeDesc::named("Errors")))
        .method(MethodDecl::provided(
            "describe",
            TypeDesc::string(),
            |proxy, _| Ok(Value::new(format!("{proxy} says hi"))),
        ))
        .method(MethodDecl::identity("finalize"))
        .method(MethodDecl::new("unkeyed"))
        .nested(
            Interface::builder("Errors")
                .method(MethodDecl::new("notFound").param("path", TypeDesc::string())),
        )
        .build()
        .unwrap()
}

#[test]
fn translation_builds_message() {
    let proxy = Proxy::builder(messages()).build();
    let message = proxy
        .call_as::<Message>("helloWorld", &[Some(Value::new("Ada"))])
        .unwrap();
    assert_eq!(message.key(), "hello.world");
    assert_eq!(message.args(), &[Component::text("Ada")]);
}

#[test]
fn absent_argument_list_means_no_arguments() {
    let proxy = Proxy::builder(messages()).build();
    assert_eq!(
        proxy.invoke("helloWorld", None).unwrap_err(),
        ProxyError::ArityMismatch {
            method: MethodId::new("Messages", "helloWorld"),
            expected: 1,
            got: 0,
        }
    );
    let text = proxy.invoke("to_string", None).unwrap();
    assert_eq!(text.downcast_ref::<String>().map(String::as_str), Some("Proxy<Messages>"));
}

#[test]
fn identity_methods() {
    let proxy = Proxy::builder(messages()).build();
    let same = proxy.clone();
    let other = Proxy::builder(messages()).build();

    let eq = |target: Option<Value>| proxy.call_as::<bool>("eq", &[target]).unwrap();
    assert!(eq(Some(Value::new(same.clone()))));
    assert!(!eq(Some(Value::new(other.clone()))));
    assert!(!eq(Some(Value::new("not a proxy"))));
    assert!(!eq(None));

    let hash = proxy.call_as::<usize>("hash", &[]).unwrap();
    assert_eq!(hash, same.call_as::<usize>("hash", &[]).unwrap());
    assert_ne!(hash, other.call_as::<usize>("hash", &[]).unwrap());

    assert_eq!(proxy, same);
    assert_ne!(proxy, other);
    assert_eq!(proxy.to_string(), "Proxy<Messages>");
}

#[test]
fn unsupported_identity_method() {
    let proxy = Proxy::builder(messages()).build();
    assert_eq!(
        proxy.call("finalize", &[]).unwrap_err(),
        ProxyError::UnsupportedOperation {
            method: MethodId::new("Messages", "finalize")
        }
    );
}

#[test]
fn provided_method_bypasses_pipeline() {
    let proxy = Proxy::builder(messages()).build();
    let described = proxy.call_as::<String>("describe", &[]).unwrap();
    assert_eq!(described, "Proxy<Messages> says hi");
    assert!(proxy.resolved("describe").is_err());
}

#[test]
fn unknown_method() {
    let proxy = Proxy::builder(messages()).build();
    assert_eq!(
        proxy.call("nope", &[]).unwrap_err(),
        ProxyError::UnknownMethod {
            interface: "Messages".into(),
            method: "nope".into(),
        }
    );
}

#[test]
fn missing_key_surfaces_to_caller() {
    let proxy = Proxy::builder(messages()).build();
    assert_eq!(
        proxy.call("unkeyed", &[]).unwrap_err(),
        ProxyError::MissingKey {
            method: MethodId::new("Messages", "unkeyed")
        }
    );
}

#[test]
fn child_accessor_is_cached() {
    let proxy = Proxy::builder(messages()).keys(DerivedKeys::new()).build();
    let first = proxy.child("errors").unwrap();
    let second = proxy.child("errors").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_string(), "Proxy<Errors>");

    let raw = proxy.call("errors", &[]).unwrap();
    assert_eq!(raw.type_desc(), &TypeDesc::named("Errors"));

    let message = first
        .call_as::<Message>("notFound", &[Some(Value::new("/home"))])
        .unwrap();
    assert_eq!(message.key(), "errors.not.found");
}

#[test]
fn child_of_a_different_parent_is_distinct() {
    let a = Proxy::builder(messages()).build();
    let b = Proxy::builder(messages()).build();
    assert_ne!(a.child("errors").unwrap(), b.child("errors").unwrap());
}

#[test]
fn resolved_method_is_cached() {
    let proxy = Proxy::builder(messages()).build();
    let first = proxy.resolved("helloWorld").unwrap();
    assert_eq!(first.key(), "hello.world");
    assert_eq!(first.return_type(), &TypeDesc::message());
    assert!(Arc::ptr_eq(&first, &proxy.resolved("helloWorld").unwrap()));
}

#[test]
fn call_as_reports_result_type_mismatch() {
    let proxy = Proxy::builder(messages()).build();
    assert_eq!(
        proxy
            .call_as::<String>("helloWorld", &[Some(Value::new("Ada"))])
            .unwrap_err(),
        ProxyError::ResultTypeMismatch {
            method: MethodId::new("Messages", "helloWorld"),
            expected: TypeDesc::string(),
            got: TypeDesc::message(),
        }
    );
    assert!(proxy.child("helloWorld").is_err());
}

#[test]
fn eq_is_false_unless_given_exactly_one_proxy() {
    let proxy = Proxy::builder(messages()).build();
    let same = Some(Value::new(proxy.clone()));

    assert!(!proxy.call_as::<bool>("eq", &[]).unwrap());
    let absent = proxy.invoke("eq", None).unwrap();
    assert_eq!(absent.downcast_ref::<bool>(), Some(&false));
    assert!(!proxy.call_as::<bool>("eq", &[same.clone(), same.clone()]).unwrap());
    assert!(proxy.call_as::<bool>("eq", &[same]).unwrap());
}

#[test]
fn identity_methods_ignore_arity() {
    let interface = Interface::builder("Messages")
        .method(MethodDecl::identity("finalize").param("reason", TypeDesc::string()))
        .build()
        .unwrap();
    let proxy = Proxy::builder(interface).build();

    assert_eq!(
        proxy.call("finalize", &[]).unwrap_err(),
        ProxyError::UnsupportedOperation {
            method: MethodId::new("Messages", "finalize")
        }
    );
    let text = proxy
        .call_as::<String>("to_string", &[Some(Value::new("extra"))])
        .unwrap();
    assert_eq!(text, "Proxy<Messages>");
}
