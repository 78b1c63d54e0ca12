//! Member pages the board redirects to

use super::layout;

pub fn error() -> String {
    layout(
        "오류",
        r#"<h1>요청을 처리하지 못했습니다</h1>
<p>잠시 후 다시 시도해 주세요.</p>
<p><a href="/board/list/1">목록으로</a></p>"#,
    )
}

pub fn login() -> String {
    layout(
        "로그인 필요",
        r#"<h1>로그인이 필요합니다</h1>
<p>이 기능은 로그인한 회원만 사용할 수 있습니다.</p>
<p><a href="/board/list/1">목록으로</a></p>"#,
    )
}
