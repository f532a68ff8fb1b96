// 仅在启用 tauri-app 特性时生成 Tauri 上下文（无头构建/测试不依赖 tauri.conf.json）
fn main() {
    if std::env::var_os("CARGO_FEATURE_TAURI_APP").is_some() {
        tauri_build::build();
    }
}
