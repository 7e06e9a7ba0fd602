//! Bootstrap sketch rendering.
//!
//! The sketch is a minimal Arduino program: bring up the network, start a
//! server on port 80, register the static routes and hand every client to
//! the aWOT app. WiFi credentials and the Ethernet MAC are placeholders the
//! user is expected to edit.

use super::router::ROUTER_FUNCTION;
use crate::types::SketchMode;

/// TCP port the generated server listens on.
pub const SERVER_PORT: u16 = 80;

const SERIAL_BAUD: u32 = 115200;

struct Transport {
    library: &'static str,
    globals: &'static str,
    setup: &'static str,
}

const WIFI: Transport = Transport {
    library: "WiFi",
    globals: "char ssid[] = \"ssid\";\nchar password[] = \"pass\";",
    setup: "  WiFi.begin(ssid, password);

  while (WiFi.status() != WL_CONNECTED) {
    delay(500);
    Serial.print(\".\");
  }

  Serial.println(\"\");
  Serial.println(WiFi.localIP());",
};

const ETHERNET: Transport = Transport {
    library: "Ethernet",
    globals: "byte mac[] = { 0xDE, 0xAD, 0xBE, 0xEF, 0xFE, 0xED };",
    setup: "  if (Ethernet.begin(mac)) {
    Serial.println(Ethernet.localIP());
  } else {
    Serial.println(\"Ethernet failed\");
  }",
};

/// Render the sketch for `mode`, or `None` when no sketch is wanted.
pub fn render_sketch(mode: SketchMode) -> Option<String> {
    let t = match mode {
        SketchMode::No => return None,
        SketchMode::Wifi => &WIFI,
        SketchMode::Ethernet => &ETHERNET,
    };
    let lib = t.library;
    Some(format!(
        "#include <SPI.h>
#include <{lib}.h>
#include <aWOT.h>

#include \"StaticFiles.h\"

{globals}
{lib}Server server({SERVER_PORT});

WebApp app;

void setup() {{
  Serial.begin({SERIAL_BAUD});

{setup}

  server.begin();
  {ROUTER_FUNCTION}(&app);
}}

void loop() {{
  {lib}Client client = server.available();
  if (client) {{
    app.process(&client);
  }}
}}
",
        globals = t.globals,
        setup = t.setup,
    ))
}
