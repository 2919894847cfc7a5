//! Detection, dispatch and resolution of `nameof` calls.

use std::any::Any;
use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};

use crate::call::{FunctionKind, NameofCall};
use crate::context::TransformContext;
use crate::error::{EngineResult, NameofError, NameofErrorKind};
use crate::host::{ErrorSink, HostBinding, HostSyntax};
use crate::mutation::MutationTracker;
use crate::node::{ParsedNode, PathPartCandidate};
use crate::result::{NameofResult, ResultBuilder};
use crate::segment::Segment;

/// What one call resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<N> {
    Single(NameofResult<N>),
    /// `split` and `array` produce one result per element.
    Array(Vec<NameofResult<N>>),
}

type Path<N> = Vec<PathPartCandidate<N>>;

/// Resolves `nameof` calls for one host and one traversal.
///
/// The engine owns the mutation side table, so independent trees need
/// independent engines.
pub struct NameofEngine<H: HostBinding, S> {
    host: H,
    sink: S,
    mutations: MutationTracker<H::Key, H::Node>,
}

impl<H, S> NameofEngine<H, S>
where
    H: HostBinding,
    S: ErrorSink<H::Node>,
{
    pub fn new(host: H, sink: S) -> Self {
        Self {
            host,
            sink,
            mutations: MutationTracker::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Replace `input` with its resolution, or return it unchanged.
    ///
    /// Errors are reported to the sink and the original node is returned. A
    /// panic inside the host while resolving one call is reported as
    /// [`NameofErrorKind::Internal`] against that call, and the walk goes on.
    pub fn transform(&mut self, input: H::Input, context: &mut TransformContext<'_, H>) -> H::Node {
        let node = self.host.extract(input);
        let attempt = panic::catch_unwind(AssertUnwindSafe(|| self.try_transform(&node, context)));
        let outcome = attempt.unwrap_or_else(|payload| {
            Err(NameofError::new(
                node.clone(),
                NameofErrorKind::Internal {
                    message: panic_message(payload.as_ref()),
                },
            ))
        });
        match outcome {
            Ok(Some(generated)) => generated,
            Ok(None) => node,
            Err(error) => {
                self.report(error, context);
                node
            }
        }
    }

    /// Report interpolations that were never consumed, ending the traversal.
    pub fn finish(&mut self, context: TransformContext<'_, H>) {
        let host_context = context.host_context();
        let nameof = self.host.nameof_name(host_context).into_owned();
        for node in context.into_pending() {
            let code = self.host.get_source_code(&node, host_context);
            let error = NameofError::new(
                node,
                NameofErrorKind::UnusedInterpolation {
                    code,
                    nameof: nameof.clone(),
                },
            );
            let location = self.host.get_location(&error.node, host_context);
            log::debug!("{}: {}", location, error);
            self.sink.report(location, error);
        }
    }

    fn try_transform(
        &mut self,
        node: &H::Node,
        context: &mut TransformContext<'_, H>,
    ) -> EngineResult<Option<H::Node>, H::Node> {
        let Some(call) = self.detect_call(node, context) else {
            return Ok(None);
        };
        let Some(resolution) = self.process_call(&call, context)? else {
            return Ok(None);
        };
        let generated = match resolution {
            Resolution::Single(result) => self.host.dump(result),
            Resolution::Array(results) => {
                let elements = results.into_iter().map(|result| self.host.dump(result)).collect();
                self.host.create_array_literal(elements)
            }
        };
        log::debug!(
            "resolved `{}` call at {}",
            call.display_name(&self.nameof_name(context)),
            self.host.get_location(node, context.host_context())
        );
        self.store_original(node.clone(), &generated);
        Ok(Some(generated))
    }

    fn report(&mut self, error: NameofError<H::Node>, context: &TransformContext<'_, H>) {
        let location = self.host.get_location(&error.node, context.host_context());
        if error.kind.is_internal() {
            log::warn!("{}: {}", location, error);
        } else {
            log::debug!("{}: {}", location, error);
        }
        self.sink.report(location, error);
    }

    pub fn nameof_name<'c>(&self, context: &TransformContext<'c, H>) -> Cow<'c, str> {
        self.host.nameof_name(context.host_context())
    }

    // ========================================================================
    // Mutation tracking
    // ========================================================================

    pub fn store_original(&mut self, original: H::Node, generated: &H::Node) {
        self.mutations.store_original(self.host.key(generated), original);
    }

    pub fn get_original(&self, generated: &H::Node) -> Option<&H::Node> {
        self.mutations.get_original(&self.host.key(generated))
    }

    pub fn is_mutated(&self, node: &H::Node) -> bool {
        self.mutations.is_mutated(&self.host.key(node))
    }

    // ========================================================================
    // Detection
    // ========================================================================

    /// Recognize a `nameof` call at `node`.
    ///
    /// An access on a `nameof.typed<T>()` call is rewritten into a bare call
    /// whose only argument is the access itself.
    pub fn detect_call(&self, node: &H::Node, context: &TransformContext<'_, H>) -> Option<NameofCall<H::Node>> {
        let host_context = context.host_context();
        if self.host.is_access_expression(node) {
            let inner = match self.host.parse_internal(node, host_context) {
                Ok(HostSyntax::PropertyAccess { expression, .. }) | Ok(HostSyntax::IndexAccess { expression, .. }) => {
                    expression
                }
                _ => return None,
            };
            let inner_call = self.detect_call(&inner, context)?;
            if inner_call.function != Some(FunctionKind::Typed) {
                return None;
            }
            return Some(NameofCall {
                source: node.clone(),
                function: None,
                function_name: None,
                type_arguments: Vec::new(),
                arguments: vec![node.clone()],
            });
        }

        if !self.host.is_call_expression(node) {
            return None;
        }
        let Ok(HostSyntax::CallExpression {
            callee,
            type_arguments,
            arguments,
        }) = self.host.parse_internal(node, host_context)
        else {
            return None;
        };

        let (target, function_name) = match self.host.parse_internal(&callee, host_context).ok()? {
            HostSyntax::Identifier { .. } => (callee, None),
            HostSyntax::PropertyAccess {
                expression,
                property_name,
            } => (expression, Some(property_name)),
            HostSyntax::IndexAccess { expression, index } => match self.host.parse_internal(&index, host_context).ok()? {
                HostSyntax::StringLiteral { text } => (expression, Some(text)),
                _ => return None,
            },
            _ => return None,
        };

        match self.host.parse_internal(&target, host_context).ok()? {
            HostSyntax::Identifier { name } if name == self.nameof_name(context) => {}
            _ => {
                log::trace!("call at {:?} does not target the marker", node);
                return None;
            }
        }

        Some(NameofCall {
            source: node.clone(),
            function: function_name.as_deref().and_then(FunctionKind::from_name),
            function_name,
            type_arguments,
            arguments,
        })
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Resolve a detected call. `Ok(None)` means there is nothing to replace
    /// yet.
    pub fn process_call(
        &self,
        call: &NameofCall<H::Node>,
        context: &mut TransformContext<'_, H>,
    ) -> EngineResult<Option<Resolution<H::Node>>, H::Node> {
        if call.is_unknown_function() {
            return Err(self.error(
                &call.source,
                NameofErrorKind::UnsupportedFunction {
                    function: call.display_name(&self.nameof_name(context)),
                },
            ));
        }
        match call.function {
            None => self.process_default(call, context).map(Some),
            Some(FunctionKind::Typed) => {
                if self.host.is_access_expression(&call.source) {
                    self.process_default(call, context).map(Some)
                } else {
                    Ok(None)
                }
            }
            Some(FunctionKind::Full) => self.process_full(call, context).map(Some),
            Some(FunctionKind::Split) => self.process_split(call, context).map(Some),
            Some(FunctionKind::Array) | Some(FunctionKind::LegacyArray) => self.process_array(call, context).map(Some),
            Some(FunctionKind::Interpolate) => {
                self.process_interpolate(call, context)?;
                Ok(None)
            }
        }
    }

    fn process_default(
        &self,
        call: &NameofCall<H::Node>,
        context: &mut TransformContext<'_, H>,
    ) -> EngineResult<Resolution<H::Node>, H::Node> {
        let target = match call.targets() {
            [target] => target,
            _ => {
                return Err(self.error(
                    &call.source,
                    NameofErrorKind::InvalidDefaultCall {
                        nameof: self.nameof_name(context).into_owned(),
                        arguments: call.arguments.len(),
                        type_arguments: call.type_arguments.len(),
                    },
                ))
            }
        };
        let parsed = self.parse_node(target, context)?;
        let path = self.resolve_target_path(parsed, context)?;
        let name = self.trailing_name(path, &call.source, context)?;
        Ok(Resolution::Single(NameofResult::Plain { text: name }))
    }

    fn process_full(
        &self,
        call: &NameofCall<H::Node>,
        context: &mut TransformContext<'_, H>,
    ) -> EngineResult<Resolution<H::Node>, H::Node> {
        let parts = self.resolve_segment(call, context)?;
        let mut builder = ResultBuilder::new();
        for part in parts {
            match part {
                PathPartCandidate::Identifier { value, .. } | PathPartCandidate::PropertyAccess { value, .. } => {
                    builder.add_name(&value)
                }
                PathPartCandidate::IndexAccess { value, .. } => builder.add_index(&value),
                PathPartCandidate::Interpolation { source, expression } => {
                    context.consume_interpolation(&self.host.key(&source));
                    builder.add_interpolation(expression);
                }
                PathPartCandidate::Unsupported { source, reason, .. } => {
                    return Err(reason.unwrap_or_else(|| self.unsupported_node(&source, context)))
                }
            }
        }
        Ok(Resolution::Single(builder.finish()))
    }

    fn process_split(
        &self,
        call: &NameofCall<H::Node>,
        context: &mut TransformContext<'_, H>,
    ) -> EngineResult<Resolution<H::Node>, H::Node> {
        let parts = self.resolve_segment(call, context)?;
        let names = parts
            .into_iter()
            .map(|part| self.part_name(part, context).map(NameofResult::plain))
            .collect::<EngineResult<Vec<_>, _>>()?;
        Ok(Resolution::Array(names))
    }

    fn process_array(
        &self,
        call: &NameofCall<H::Node>,
        context: &mut TransformContext<'_, H>,
    ) -> EngineResult<Resolution<H::Node>, H::Node> {
        let targets = call.targets();
        let mut parameter_names = Vec::new();
        let mut elements = targets.to_vec();

        if let [single] = targets {
            if let ParsedNode::Function {
                parameter_names: names,
                body,
                ..
            } = self.parse_node(single, context)?
            {
                // A function returning an array literal names each element.
                elements = self
                    .host
                    .get_array_elements(&body)
                    .ok_or_else(|| self.unsupported_node(&body, context))?;
                parameter_names = names;
            }
        }

        let mut results = Vec::with_capacity(elements.len());
        for element in elements {
            if self.host.is_string_literal(&element) || self.host.is_template_literal(&element) {
                if self.is_mutated(&element) {
                    results.push(NameofResult::Node { node: element });
                    continue;
                }
                return Err(self.unsupported_node(&element, context));
            }
            let parsed = self.parse_node(&element, context)?;
            let mut path = self.resolve_target_path(parsed, context)?;
            if strip_parameter(&mut path, &parameter_names) && path.is_empty() {
                return Err(self.missing_property_access(&element, context));
            }
            let name = self.trailing_name(path, &element, context)?;
            results.push(NameofResult::Plain { text: name });
        }
        Ok(Resolution::Array(results))
    }

    fn process_interpolate(
        &self,
        call: &NameofCall<H::Node>,
        context: &mut TransformContext<'_, H>,
    ) -> EngineResult<(), H::Node> {
        if call.arguments.len() != 1 {
            return Err(self.invalid_interpolate_arity(&call.source, call.arguments.len(), context));
        }
        context.record_interpolation(self.host.key(&call.source), call.source.clone());
        Ok(())
    }

    // ========================================================================
    // Parsing
    // ========================================================================

    /// Parse `node` and its access chain into canonical form.
    ///
    /// `nameof.interpolate(x)` becomes an interpolation of `x`. Host errors
    /// become the reason of an unsupported node.
    pub fn parse_node(&self, node: &H::Node, context: &TransformContext<'_, H>) -> EngineResult<ParsedNode<H::Node>, H::Node> {
        if let Some(call) = self.detect_call(node, context) {
            if call.function == Some(FunctionKind::Interpolate) {
                return match <[H::Node; 1]>::try_from(call.arguments) {
                    Ok([expression]) => Ok(ParsedNode::Interpolation {
                        source: node.clone(),
                        expression,
                    }),
                    Err(arguments) => Err(self.invalid_interpolate_arity(node, arguments.len(), context)),
                };
            }
        }

        let syntax = match self.host.parse_internal(node, context.host_context()) {
            Ok(syntax) => syntax,
            Err(reason) => {
                return Ok(ParsedNode::Unsupported {
                    source: node.clone(),
                    reason: Some(reason),
                })
            }
        };
        let source = node.clone();
        Ok(match syntax {
            HostSyntax::Identifier { name } => ParsedNode::Identifier { source, name },
            HostSyntax::NumericLiteral { value } => ParsedNode::NumericLiteral { source, value },
            HostSyntax::StringLiteral { text } => ParsedNode::StringLiteral { source, text },
            HostSyntax::CallExpression {
                callee,
                type_arguments,
                arguments,
            } => ParsedNode::CallExpression {
                source,
                callee,
                type_arguments,
                arguments,
            },
            HostSyntax::PropertyAccess {
                expression,
                property_name,
            } => ParsedNode::PropertyAccess {
                source,
                expression: Box::new(self.parse_node(&expression, context)?),
                property_name,
            },
            HostSyntax::IndexAccess { expression, index } => ParsedNode::IndexAccess {
                source,
                expression: Box::new(self.parse_node(&expression, context)?),
                index: Box::new(self.parse_node(&index, context)?),
            },
            HostSyntax::Function { parameter_names, body } => ParsedNode::Function {
                source,
                parameter_names,
                body,
            },
            HostSyntax::Unsupported => ParsedNode::Unsupported { source, reason: None },
        })
    }

    /// The path a target names. For a function, the path of its returned
    /// expression without the leading parameter.
    fn resolve_target_path(
        &self,
        parsed: ParsedNode<H::Node>,
        context: &TransformContext<'_, H>,
    ) -> EngineResult<Path<H::Node>, H::Node> {
        match parsed {
            ParsedNode::Function {
                parameter_names, body, ..
            } => {
                let mut path = self.parse_node(&body, context)?.into_path();
                if strip_parameter(&mut path, &parameter_names) && path.is_empty() {
                    return Err(self.missing_property_access(&body, context));
                }
                Ok(path)
            }
            other => Ok(other.into_path()),
        }
    }

    // ========================================================================
    // Segments
    // ========================================================================

    /// The slice of the target's path requested by a `full` or `split` call.
    pub fn resolve_segment(
        &self,
        call: &NameofCall<H::Node>,
        context: &TransformContext<'_, H>,
    ) -> EngineResult<Path<H::Node>, H::Node> {
        let (expression, index) = self.segment_target(call, context)?;
        let parsed = self.parse_node(&expression, context)?;
        let path = self.resolve_target_path(parsed, context)?;
        let segment = match index {
            Some((index_node, index)) => {
                Segment::for_index(path.len(), Some(index)).map_err(|kind| self.error(&index_node, kind))?
            }
            None => Segment::for_index(path.len(), None).map_err(|kind| self.error(&call.source, kind))?,
        };
        self.take_segment(path, segment, &call.source, context)
    }

    /// Split a segment call's arguments into the target and optional index.
    fn segment_target(
        &self,
        call: &NameofCall<H::Node>,
        context: &TransformContext<'_, H>,
    ) -> EngineResult<(H::Node, Option<(H::Node, i64)>), H::Node> {
        match (call.arguments.as_slice(), call.type_arguments.as_slice()) {
            ([], [type_argument]) => Ok((type_argument.clone(), None)),
            ([argument], []) => Ok((argument.clone(), None)),
            ([argument], [type_argument]) => match self.parse_node(argument, context)? {
                ParsedNode::NumericLiteral { value, .. } => {
                    let index = self.integral_index(argument, value, context)?;
                    Ok((type_argument.clone(), Some((argument.clone(), index))))
                }
                _ => Err(self.invalid_segment_call(call, context)),
            },
            ([expression, index_node], []) => match self.parse_node(index_node, context)? {
                ParsedNode::NumericLiteral { value, .. } => {
                    let index = self.integral_index(index_node, value, context)?;
                    Ok((expression.clone(), Some((index_node.clone(), index))))
                }
                _ => Err(self.error(
                    index_node,
                    NameofErrorKind::IndexParsing {
                        code: self.source_code(index_node, context),
                    },
                )),
            },
            _ => Err(self.invalid_segment_call(call, context)),
        }
    }

    fn integral_index(&self, node: &H::Node, value: f64, context: &TransformContext<'_, H>) -> EngineResult<i64, H::Node> {
        if value.is_finite() && value.fract() == 0.0 && value.abs() <= i64::MAX as f64 {
            Ok(value as i64)
        } else {
            Err(self.error(
                node,
                NameofErrorKind::IndexParsing {
                    code: self.source_code(node, context),
                },
            ))
        }
    }

    /// Cut `segment` out of `path`, failing on any unsupported element in it.
    fn take_segment(
        &self,
        mut path: Path<H::Node>,
        segment: Segment,
        call_source: &H::Node,
        context: &TransformContext<'_, H>,
    ) -> EngineResult<Path<H::Node>, H::Node> {
        let range = segment.range(path.len()).map_err(|kind| self.error(call_source, kind))?;
        path.drain(range)
            .map(|part| match part {
                PathPartCandidate::Unsupported {
                    source,
                    reason,
                    is_accessor,
                } => Err(self.unsupported_part(source, reason, is_accessor, context)),
                part => Ok(part),
            })
            .collect()
    }

    /// The last element of `path` as a plain name.
    fn trailing_name(
        &self,
        path: Path<H::Node>,
        call_source: &H::Node,
        context: &TransformContext<'_, H>,
    ) -> EngineResult<String, H::Node> {
        let segment = Segment::last(path.len());
        let mut parts = self
            .take_segment(path, segment, call_source, context)
            .map_err(|error| match error.kind {
                NameofErrorKind::SegmentNotFound { .. } => NameofError::new(
                    error.node,
                    NameofErrorKind::Custom {
                        message: "Unable to find an expression to get the name from.".to_string(),
                    },
                ),
                _ => error,
            })?;
        match parts.pop() {
            Some(part) => self.part_name(part, context),
            None => Err(self.error(
                call_source,
                NameofErrorKind::Custom {
                    message: "Unable to find an expression to get the name from.".to_string(),
                },
            )),
        }
    }

    fn part_name(&self, part: PathPartCandidate<H::Node>, context: &TransformContext<'_, H>) -> EngineResult<String, H::Node> {
        match part {
            PathPartCandidate::Identifier { value, .. } | PathPartCandidate::PropertyAccess { value, .. } => Ok(value),
            PathPartCandidate::IndexAccess { value, .. } => Ok(value.to_name()),
            PathPartCandidate::Interpolation { source, .. } => Err(self.error(
                &source,
                NameofErrorKind::UnsupportedScenario {
                    code: self.source_code(&source, context),
                },
            )),
            PathPartCandidate::Unsupported { source, reason, .. } => {
                Err(reason.unwrap_or_else(|| self.unsupported_node(&source, context)))
            }
        }
    }

    // ========================================================================
    // Errors
    // ========================================================================

    fn error(&self, node: &H::Node, kind: NameofErrorKind) -> NameofError<H::Node> {
        NameofError::new(node.clone(), kind)
    }

    fn source_code(&self, node: &H::Node, context: &TransformContext<'_, H>) -> String {
        self.host.get_source_code(node, context.host_context())
    }

    fn unsupported_part(
        &self,
        source: H::Node,
        reason: Option<NameofError<H::Node>>,
        is_accessor: bool,
        context: &TransformContext<'_, H>,
    ) -> NameofError<H::Node> {
        if let Some(reason) = reason {
            return reason;
        }
        let kind = if is_accessor {
            NameofErrorKind::UnsupportedAccessorType {
                code: self.source_code(&source, context),
            }
        } else if self.is_mutated(&source) {
            NameofErrorKind::NestedNameof {
                nameof: self.nameof_name(context).into_owned(),
            }
        } else {
            NameofErrorKind::UnsupportedNode {
                code: self.source_code(&source, context),
                nested_in: None,
            }
        };
        NameofError::new(source, kind)
    }

    fn unsupported_node(&self, node: &H::Node, context: &TransformContext<'_, H>) -> NameofError<H::Node> {
        let nested_in = self
            .is_mutated(node)
            .then(|| self.nameof_name(context).into_owned());
        self.error(
            node,
            NameofErrorKind::UnsupportedNode {
                code: self.source_code(node, context),
                nested_in,
            },
        )
    }

    fn missing_property_access(&self, node: &H::Node, context: &TransformContext<'_, H>) -> NameofError<H::Node> {
        self.error(
            node,
            NameofErrorKind::MissingPropertyAccess {
                code: self.source_code(node, context),
            },
        )
    }

    fn invalid_segment_call(&self, call: &NameofCall<H::Node>, context: &TransformContext<'_, H>) -> NameofError<H::Node> {
        self.error(
            &call.source,
            NameofErrorKind::InvalidSegmentCall {
                function: call.display_name(&self.nameof_name(context)),
                arguments: call.arguments.len(),
                type_arguments: call.type_arguments.len(),
            },
        )
    }

    fn invalid_interpolate_arity(
        &self,
        node: &H::Node,
        actual: usize,
        context: &TransformContext<'_, H>,
    ) -> NameofError<H::Node> {
        self.error(
            node,
            NameofErrorKind::InvalidArgumentCount {
                function: format!("{}.{}", self.nameof_name(context), FunctionKind::Interpolate),
                expected: 1,
                actual,
            },
        )
    }
}

/// Drop a leading identifier naming one of `parameters`. Returns whether
/// anything was dropped.
fn strip_parameter<N>(path: &mut Path<N>, parameters: &[String]) -> bool {
    let leading_parameter = path
        .first()
        .and_then(|part| match part {
            PathPartCandidate::Identifier { value, .. } => Some(value),
            _ => None,
        })
        .is_some_and(|name| parameters.iter().any(|parameter| parameter == name));
    if leading_parameter {
        path.remove(0);
    }
    leading_parameter
}

/// Text of a caught panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "host panicked".to_string()
    }
}
