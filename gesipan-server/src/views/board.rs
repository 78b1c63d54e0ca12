//! Board pages: list, view, write, update

use std::fmt::Write;

use crate::models::{BoardDetail, BoardSummary, Pager, Reply};

use super::{escape, layout};

/// Everything the list page shows
pub struct ListPage<'a> {
    pub posts: &'a [BoardSummary],
    pub pager: Pager,
    /// Prefix page numbers are appended to, e.g. `/board/list/`
    pub baseurl: &'a str,
}

pub fn list(page: &ListPage<'_>) -> String {
    let mut body = String::new();
    body.push_str("<h1>게시판</h1>\n<p><a href=\"/board/write\">글쓰기</a></p>\n");
    body.push_str(
        "<table>\n<thead><tr><th>번호</th><th>제목</th><th>작성자</th><th>작성일</th><th>조회</th></tr></thead>\n<tbody>\n",
    );

    if page.posts.is_empty() {
        body.push_str("<tr><td colspan=\"5\">게시물이 없습니다.</td></tr>\n");
    }
    for post in page.posts {
        let _ = writeln!(
            body,
            "<tr><td>{bno}</td><td><a href=\"/board/view/{bno}\">{title}</a></td><td>{userid}</td><td>{regdate}</td><td>{views}</td></tr>",
            bno = post.bno,
            title = escape(&post.title),
            userid = escape(&post.userid),
            regdate = post.regdate.format("%Y-%m-%d"),
            views = post.views,
        );
    }
    body.push_str("</tbody>\n</table>\n");

    body.push_str(&pager(&page.pager, page.baseurl));
    body.push_str(SEARCH_FORM);

    layout("게시판", &body)
}

fn pager(pager: &Pager, baseurl: &str) -> String {
    let base = escape(baseurl);
    let mut nav = String::from("<nav class=\"pager\">");

    if let Some(prev) = pager.prev_block() {
        let _ = write!(nav, "<a href=\"{base}{prev}\">이전</a>");
    }
    for n in pager.block_pages() {
        if n == pager.cpg {
            let _ = write!(nav, "<strong>{n}</strong>");
        } else {
            let _ = write!(nav, "<a href=\"{base}{n}\">{n}</a>");
        }
    }
    if let Some(next) = pager.next_block() {
        let _ = write!(nav, "<a href=\"{base}{next}\">다음</a>");
    }

    nav.push_str("</nav>\n");
    nav
}

const SEARCH_FORM: &str = r#"<form id="search">
  <select name="ftype">
    <option value="title">제목</option>
    <option value="userid">작성자</option>
    <option value="contents">본문</option>
    <option value="titcont">제목+본문</option>
  </select>
  <input name="fkey" required maxlength="50">
  <button type="submit">검색</button>
</form>
<script>
  document.getElementById('search').addEventListener('submit', (e) => {
    e.preventDefault();
    const f = e.target;
    const key = f.fkey.value.trim();
    if (!key) return;
    location.href = '/board/list/' + f.ftype.value + '/' + encodeURIComponent(key) + '/1';
  });
</script>
"#;

pub fn view(detail: &BoardDetail) -> String {
    let post = &detail.board;
    let mut body = String::new();

    let _ = write!(
        body,
        "<article>\n<h1>{title}</h1>\n<p>{userid} · {regdate} · 조회 {views}</p>\n<div class=\"contents\">{contents}</div>\n</article>\n",
        title = escape(&post.title),
        userid = escape(&post.userid),
        regdate = post.regdate.format("%Y-%m-%d %H:%M"),
        views = post.views,
        contents = escape(&post.contents).replace('\n', "<br>\n"),
    );

    if !detail.attachs.is_empty() {
        body.push_str("<h2>첨부파일</h2>\n<ul>\n");
        for attach in &detail.attachs {
            let _ = writeln!(
                body,
                "<li>{} ({} bytes)</li>",
                escape(&attach.fname),
                attach.fsize
            );
        }
        body.push_str("</ul>\n");
    }

    let _ = write!(
        body,
        r#"<p><a href="/board/list/1">목록</a> <button id="delete" data-bno="{bno}">삭제</button></p>
<script>
  document.getElementById('delete').addEventListener('click', async (e) => {{
    if (!confirm('삭제하시겠습니까?')) return;
    const res = await fetch('/board/view/' + e.target.dataset.bno, {{ method: 'DELETE' }});
    const data = await res.json();
    alert(data.message || data.detail);
    if (res.ok) location.href = '/board/list/1';
  }});
</script>
"#,
        bno = post.bno,
    );

    body.push_str("<section>\n<h2>댓글</h2>\n");
    body.push_str(&reply_form("/board/reply", post.bno, None));
    for reply in &detail.replies {
        body.push_str(&reply_item(reply));
    }
    body.push_str("</section>\n");

    layout(&post.title, &body)
}

fn reply_item(reply: &Reply) -> String {
    let class = if reply.is_root() { "reply" } else { "reply nested" };
    let mut item = format!(
        "<div class=\"{class}\">\n<p><b>{userid}</b> {regdate}</p>\n<p>{text}</p>\n",
        userid = escape(&reply.userid),
        regdate = reply.regdate.format("%Y-%m-%d %H:%M"),
        text = escape(&reply.reply),
    );
    if reply.is_root() {
        item.push_str(&reply_form("/board/rreply", reply.bno, Some(reply.rno)));
    }
    item.push_str("</div>\n");
    item
}

fn reply_form(action: &str, bno: i64, rpno: Option<i64>) -> String {
    let parent = rpno
        .map(|rno| format!("<input type=\"hidden\" name=\"rpno\" value=\"{rno}\">"))
        .unwrap_or_default();

    format!(
        r#"<form method="post" action="{action}">
  <input type="hidden" name="bno" value="{bno}">{parent}
  <input name="userid" placeholder="작성자" maxlength="18">
  <textarea name="reply" required maxlength="2000"></textarea>
  <button type="submit">등록</button>
</form>
"#
    )
}

/// Write form; `uid` is the logged-in member and becomes the author.
pub fn write(uid: &str) -> String {
    let body = format!(
        r#"<h1>글쓰기</h1>
<form method="post" action="/board/write" enctype="multipart/form-data">
  <p><input name="title" placeholder="제목" required maxlength="100"></p>
  <p><input name="userid" value="{uid}" readonly></p>
  <p><textarea name="contents" rows="15" required></textarea></p>
  <p><input type="file" name="files" multiple></p>
  <p><button type="submit">등록</button> <a href="/board/list/1">취소</a></p>
</form>
"#,
        uid = escape(uid),
    );
    layout("글쓰기", &body)
}

pub fn update() -> String {
    layout(
        "글수정",
        r#"<h1>글수정</h1>
<form>
  <p><input name="title" placeholder="제목" maxlength="100"></p>
  <p><textarea name="contents" rows="15"></textarea></p>
  <p><button type="button" disabled>수정</button> <a href="/board/list/1">취소</a></p>
</form>
"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Board;
    use chrono::Utc;

    fn summary(bno: i64, title: &str) -> BoardSummary {
        BoardSummary {
            bno,
            title: title.to_string(),
            userid: "alice".to_string(),
            regdate: Utc::now(),
            views: 0,
        }
    }

    fn reply(rno: i64, rpno: i64, text: &str) -> Reply {
        Reply {
            rno,
            reply: text.to_string(),
            userid: "bob".to_string(),
            regdate: Utc::now(),
            bno: 1,
            rpno,
        }
    }

    #[test]
    fn list_escapes_titles() {
        let posts = [summary(1, "<script>x</script>")];
        let html = list(&ListPage {
            posts: &posts,
            pager: Pager::new(1, 1),
            baseurl: "/board/list/",
        });

        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains("href=\"/board/view/1\""));
    }

    #[test]
    fn pager_links_block_and_neighbours() {
        // 11 blocks worth of posts, sitting on page 12
        let nav = pager(&Pager::new(12, 25 * 30), "/board/list/title/rust/");

        assert!(nav.contains("<a href=\"/board/list/title/rust/10\">이전</a>"));
        assert!(nav.contains("<a href=\"/board/list/title/rust/11\">11</a>"));
        assert!(nav.contains("<strong>12</strong>"));
        assert!(nav.contains("<a href=\"/board/list/title/rust/20\">20</a>"));
        assert!(nav.contains("<a href=\"/board/list/title/rust/21\">다음</a>"));
        assert!(!nav.contains("/22\""));
    }

    #[test]
    fn empty_board_has_no_page_links() {
        let nav = pager(&Pager::new(1, 0), "/board/list/");
        assert!(!nav.contains("<a"));
    }

    #[test]
    fn view_nests_replies_and_offers_rreply_on_roots() {
        let detail = BoardDetail {
            board: Board {
                bno: 1,
                title: "hello".to_string(),
                userid: "alice".to_string(),
                contents: "line1\nline2".to_string(),
                regdate: Utc::now(),
                views: 3,
            },
            attachs: vec![],
            replies: vec![reply(1, 1, "root"), reply(2, 1, "child")],
        };

        let html = view(&detail);
        assert!(html.contains("line1<br>\nline2"));
        assert!(html.contains("<div class=\"reply nested\">"));
        assert_eq!(html.matches("action=\"/board/rreply\"").count(), 1);
        assert!(html.contains("name=\"rpno\" value=\"1\""));
    }

    #[test]
    fn write_form_prefills_member() {
        let html = write("a\"b");
        assert!(html.contains("value=\"a&quot;b\" readonly"));
        assert!(html.contains("enctype=\"multipart/form-data\""));
    }
}
