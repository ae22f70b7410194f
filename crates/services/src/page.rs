use serde_json::Value;

/// Queues client module calls to run once the page has loaded.
pub trait ScriptRegistrar: Send {
    fn js_call_amd(&mut self, module: &str, function: &str, args: Vec<Value>);
}

/// A queued `require([module], ...)` call.
#[derive(Debug, Clone, PartialEq)]
pub struct AmdCall {
    pub module: String,
    pub function: String,
    pub args: Vec<Value>,
}

/// Page-level script requirements collected during one request.
#[derive(Debug, Default)]
pub struct PageRequirements {
    calls: Vec<AmdCall>,
}

impl PageRequirements {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls in registration order.
    #[must_use]
    pub fn calls(&self) -> &[AmdCall] {
        &self.calls
    }

    /// Render queued calls as a single footer `<script>` block.
    ///
    /// Returns an empty string when nothing was queued.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if an argument cannot be encoded.
    pub fn render_footer(&self) -> Result<String, serde_json::Error> {
        if self.calls.is_empty() {
            return Ok(String::new());
        }

        let mut out = String::from("<script>\n");
        for call in &self.calls {
            let mut args = Vec::with_capacity(call.args.len());
            for arg in &call.args {
                args.push(script_safe_json(arg)?);
            }
            let line = format!(
                "require([{module}], function(amd) {{ amd.{function}({args}); }});\n",
                module = script_safe_json(&Value::String(call.module.clone()))?,
                function = call.function,
                args = args.join(", "),
            );
            out.push_str(&line);
        }
        out.push_str("</script>");
        Ok(out)
    }
}

impl ScriptRegistrar for PageRequirements {
    fn js_call_amd(&mut self, module: &str, function: &str, args: Vec<Value>) {
        tracing::debug!(module, function, "queued amd call");
        self.calls.push(AmdCall {
            module: module.to_string(),
            function: function.to_string(),
            args,
        });
    }
}

/// JSON that can sit inside an inline `<script>` element.
fn script_safe_json(value: &Value) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}
