//! Interface descriptors: the method table a `Proxy` dispatches on.
//!
//! An `Interface` is built once from `MethodDecl`s and nested
//! `InterfaceBuilder`s, validated, and then shared immutably. Each method is
//! classified up front into a `MethodKind`, so invocation never has to
//! re-inspect declarations.
//!
//! # Paths
//!
//! Every interface knows its path from the root (`["Messages", "Errors"]`).
//! Methods are identified by the qualified path plus their name
//! (`Messages.Errors::notFound`); key strategies and per-proxy caches key on
//! that identity.

use std::fmt;
use std::sync::Arc;

use lingo_types::{TypeDesc, Value};
use rustc_hash::FxHashMap;

use crate::{Proxy, ProxyError, ProxyResult};

/// Built-in identity methods declared on every interface.
pub(crate) mod identity {
    pub const EQ: &str = "eq";
    pub const HASH: &str = "hash";
    pub const TO_STRING: &str = "to_string";
}

/// Body of a provided method: runs against the receiving proxy with the raw
/// call arguments, bypassing key, argument, and result stages.
pub type ProvidedFn = Arc<dyn Fn(&Proxy, &[Option<Value>]) -> ProxyResult<Value> + Send + Sync>;

/// Identity of a method: qualified interface path plus method name.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MethodId {
    interface: Arc<str>,
    name: Arc<str>,
}

impl MethodId {
    pub fn new(interface: impl Into<Arc<str>>, name: impl Into<Arc<str>>) -> Self {
        MethodId {
            interface: interface.into(),
            name: name.into(),
        }
    }

    /// Qualified interface path, e.g. `Messages.Errors`.
    #[inline]
    pub fn interface(&self) -> &str {
        &self.interface
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.interface, self.name)
    }
}

impl fmt::Debug for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodId({self})")
    }
}

/// A declared parameter.
#[derive(Clone, Debug)]
pub struct ParamDesc {
    method: MethodId,
    name: Arc<str>,
    ty: TypeDesc,
    display_name: Option<Arc<str>>,
    index: usize,
}

impl ParamDesc {
    /// The method this parameter belongs to.
    #[inline]
    pub fn method(&self) -> &MethodId {
        &self.method
    }

    /// Identifier as declared.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type; argument handlers are resolved against it.
    #[inline]
    pub fn ty(&self) -> &TypeDesc {
        &self.ty
    }

    /// Explicit placeholder name, if one was declared.
    #[inline]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Zero-based position in the parameter list.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// How a method call is answered.
#[derive(Clone)]
pub enum MethodKind {
    /// `eq`, `hash`, `to_string`, or an identity-category method with no
    /// built-in meaning.
    Identity,
    /// Runs its body; the pipeline is bypassed.
    Provided(ProvidedFn),
    /// Returns the (cached) proxy for a nested interface.
    Child(Arc<Interface>),
    /// Key → arguments → result.
    Translation,
}

impl fmt::Debug for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodKind::Identity => write!(f, "Identity"),
            MethodKind::Provided(_) => write!(f, "Provided(..)"),
            MethodKind::Child(interface) => write!(f, "Child({})", interface.qualified_name()),
            MethodKind::Translation => write!(f, "Translation"),
        }
    }
}

/// A validated, classified method.
#[derive(Clone, Debug)]
pub struct MethodDesc {
    id: MethodId,
    params: Box<[ParamDesc]>,
    return_type: TypeDesc,
    key: Option<Arc<str>>,
    path: Arc<[Arc<str>]>,
    kind: MethodKind,
}

impl MethodDesc {
    #[inline]
    pub fn id(&self) -> &MethodId {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.id.name()
    }

    #[inline]
    pub fn params(&self) -> &[ParamDesc] {
        &self.params
    }

    #[inline]
    pub fn return_type(&self) -> &TypeDesc {
        &self.return_type
    }

    /// Key declared on the method itself, if any.
    #[inline]
    pub fn declared_key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Simple names from the root interface down to the declaring one.
    #[inline]
    pub fn path(&self) -> &[Arc<str>] {
        &self.path
    }

    #[inline]
    pub fn kind(&self) -> &MethodKind {
        &self.kind
    }
}

#[derive(Clone)]
enum DeclKind {
    Translation,
    Provided(ProvidedFn),
    Identity,
}

struct ParamDecl {
    name: Arc<str>,
    ty: TypeDesc,
    display_name: Option<Arc<str>>,
}

/// A method declaration, before validation.
///
/// ```ignore
/// MethodDecl::new("notFound")
///     .param("path", TypeDesc::string())
///     .returns(TypeDesc::component())
///     .key("errors.not_found")
/// ```
pub struct MethodDecl {
    name: Arc<str>,
    params: Vec<ParamDecl>,
    return_type: TypeDesc,
    key: Option<Arc<str>>,
    kind: DeclKind,
}

impl MethodDecl {
    /// A translation method returning `Message`.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        MethodDecl {
            name: name.into(),
            params: Vec::new(),
            return_type: TypeDesc::message(),
            key: None,
            kind: DeclKind::Translation,
        }
    }

    /// A method answered by `body` instead of the pipeline.
    pub fn provided<F>(name: impl Into<Arc<str>>, returns: TypeDesc, body: F) -> Self
    where
        F: Fn(&Proxy, &[Option<Value>]) -> ProxyResult<Value> + Send + Sync + 'static,
    {
        MethodDecl {
            kind: DeclKind::Provided(Arc::new(body)),
            ..Self::new(name).returns(returns)
        }
    }

    /// An identity-category method with no built-in meaning; calling it
    /// fails with `UnsupportedOperation`.
    pub fn identity(name: impl Into<Arc<str>>) -> Self {
        MethodDecl {
            kind: DeclKind::Identity,
            ..Self::new(name).returns(TypeDesc::object())
        }
    }

    #[must_use]
    pub fn param(mut self, name: impl Into<Arc<str>>, ty: TypeDesc) -> Self {
        self.params.push(ParamDecl {
            name: name.into(),
            ty,
            display_name: None,
        });
        self
    }

    /// A parameter with an explicit placeholder name.
    #[must_use]
    pub fn param_named(
        mut self,
        name: impl Into<Arc<str>>,
        ty: TypeDesc,
        display_name: impl Into<Arc<str>>,
    ) -> Self {
        self.params.push(ParamDecl {
            name: name.into(),
            ty,
            display_name: Some(display_name.into()),
        });
        self
    }

    #[must_use]
    pub fn returns(mut self, ty: TypeDesc) -> Self {
        self.return_type = ty;
        self
    }

    #[must_use]
    pub fn key(mut self, key: impl Into<Arc<str>>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// A validated interface.
pub struct Interface {
    name: Arc<str>,
    path: Arc<[Arc<str>]>,
    qualified: Arc<str>,
    methods: Box<[MethodDesc]>,
    by_name: FxHashMap<Arc<str>, usize>,
    nested: FxHashMap<Arc<str>, Arc<Interface>>,
}

impl Interface {
    pub fn builder(name: impl Into<Arc<str>>) -> InterfaceBuilder {
        InterfaceBuilder {
            name: name.into(),
            methods: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Simple name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Simple names from the root down to this interface.
    #[inline]
    pub fn path(&self) -> &[Arc<str>] {
        &self.path
    }

    /// Path joined with `.`, e.g. `Messages.Errors`.
    #[inline]
    pub fn qualified_name(&self) -> &str {
        &self.qualified
    }

    pub fn method(&self, name: &str) -> Option<&MethodDesc> {
        self.by_name.get(name).and_then(|&index| self.methods.get(index))
    }

    /// Declared methods in declaration order, built-ins first.
    pub fn methods(&self) -> &[MethodDesc] {
        &self.methods
    }

    pub fn nested(&self, name: &str) -> Option<&Arc<Interface>> {
        self.nested.get(name)
    }
}

impl fmt::Debug for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut nested: Vec<_> = self.nested.keys().map(|n| &**n).collect();
        nested.sort_unstable();
        f.debug_struct("Interface")
            .field("name", &self.qualified)
            .field(
                "methods",
                &self.methods.iter().map(MethodDesc::name).collect::<Vec<_>>(),
            )
            .field("nested", &nested)
            .finish()
    }
}

/// Collects declarations for an `Interface`.
pub struct InterfaceBuilder {
    name: Arc<str>,
    methods: Vec<MethodDecl>,
    nested: Vec<InterfaceBuilder>,
}

impl InterfaceBuilder {
    #[must_use]
    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// Declare a nested interface. A method of this interface whose return
    /// type names it becomes a child accessor.
    #[must_use]
    pub fn nested(mut self, interface: InterfaceBuilder) -> Self {
        self.nested.push(interface);
        self
    }

    /// Validate and freeze.
    pub fn build(self) -> ProxyResult<Arc<Interface>> {
        self.build_at(&[])
    }

    fn build_at(self, parent: &[Arc<str>]) -> ProxyResult<Arc<Interface>> {
        let InterfaceBuilder {
            name,
            methods: decls,
            nested: nested_decls,
        } = self;

        let path: Arc<[Arc<str>]> = parent
            .iter()
            .cloned()
            .chain(std::iter::once(Arc::clone(&name)))
            .collect();
        let qualified: Arc<str> = path.iter().map(|s| &**s).collect::<Vec<_>>().join(".").into();

        if name.is_empty() || name.contains('.') {
            return Err(ProxyError::invalid_interface(
                &qualified,
                "interface names must be non-empty and must not contain `.`",
            ));
        }

        let mut nested = FxHashMap::default();
        for decl in nested_decls {
            let child = decl.build_at(&path)?;
            let child_name = Arc::clone(&child.name);
            if nested.insert(child_name, child).is_some() {
                return Err(ProxyError::invalid_interface(
                    &qualified,
                    "duplicate nested interface",
                ));
            }
        }

        let mut methods = Vec::with_capacity(decls.len() + 3);
        methods.push(builtin(&qualified, &path, identity::EQ, TypeDesc::named("bool"), true));
        methods.push(builtin(&qualified, &path, identity::HASH, TypeDesc::named("usize"), false));
        methods.push(builtin(&qualified, &path, identity::TO_STRING, TypeDesc::string(), false));

        for decl in decls {
            methods.push(classify(decl, &qualified, &path, &nested)?);
        }

        let mut by_name = FxHashMap::default();
        for (index, method) in methods.iter().enumerate() {
            if method.name().is_empty() {
                return Err(ProxyError::invalid_interface(&qualified, "empty method name"));
            }
            if by_name.insert(Arc::clone(&method.id.name), index).is_some() {
                let reason = if is_builtin(method.name()) {
                    format!("method `{}` collides with a built-in", method.name())
                } else {
                    format!("duplicate method `{}`", method.name())
                };
                return Err(ProxyError::invalid_interface(&qualified, reason));
            }
        }

        Ok(Arc::new(Interface {
            name,
            path,
            qualified,
            methods: methods.into_boxed_slice(),
            by_name,
            nested,
        }))
    }
}

fn is_builtin(name: &str) -> bool {
    matches!(name, identity::EQ | identity::HASH | identity::TO_STRING)
}

fn builtin(
    qualified: &Arc<str>,
    path: &Arc<[Arc<str>]>,
    name: &str,
    return_type: TypeDesc,
    takes_other: bool,
) -> MethodDesc {
    let id = MethodId::new(Arc::clone(qualified), name);
    let params = if takes_other {
        vec![ParamDesc {
            method: id.clone(),
            name: Arc::from("other"),
            ty: TypeDesc::object(),
            display_name: None,
            index: 0,
        }]
    } else {
        Vec::new()
    };
    MethodDesc {
        id,
        params: params.into_boxed_slice(),
        return_type,
        key: None,
        path: Arc::clone(path),
        kind: MethodKind::Identity,
    }
}

fn classify(
    decl: MethodDecl,
    qualified: &Arc<str>,
    path: &Arc<[Arc<str>]>,
    nested: &FxHashMap<Arc<str>, Arc<Interface>>,
) -> ProxyResult<MethodDesc> {
    let id = MethodId::new(Arc::clone(qualified), Arc::clone(&decl.name));

    let mut params = Vec::with_capacity(decl.params.len());
    for (index, param) in decl.params.into_iter().enumerate() {
        if params.iter().any(|p: &ParamDesc| p.name == param.name) {
            return Err(ProxyError::invalid_interface(
                qualified,
                format!("duplicate parameter `{}` on `{}`", param.name, decl.name),
            ));
        }
        params.push(ParamDesc {
            method: id.clone(),
            name: param.name,
            ty: param.ty,
            display_name: param.display_name,
            index,
        });
    }

    let child = match &decl.return_type {
        TypeDesc::Named { name, args } if args.is_empty() => nested.get(name).cloned(),
        _ => None,
    };

    let kind = match (decl.kind, child) {
        (DeclKind::Identity, _) => MethodKind::Identity,
        (DeclKind::Provided(body), _) => MethodKind::Provided(body),
        (DeclKind::Translation, Some(child)) => {
            if !params.is_empty() {
                return Err(ProxyError::invalid_interface(
                    qualified,
                    format!("child accessor `{}` must not take parameters", decl.name),
                ));
            }
            MethodKind::Child(child)
        }
        (DeclKind::Translation, None) => MethodKind::Translation,
    };

    Ok(MethodDesc {
        id,
        params: params.into_boxed_slice(),
        return_type: decl.return_type,
        key: decl.key,
        path: Arc::clone(path),
        kind,
    })
}
