//! Built-in content: the widget catalogue and the simultaneous-equation bank.

use serde::Serialize;

use crate::domain::{Segment, Widget};
use crate::quiz::simultaneous::{BankEquation, BankQuestion};

/// One entry of the home-screen catalogue.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct WidgetInfo {
  pub widget: Widget,
  pub path: String,
  pub title: &'static str,
  pub description: &'static str,
  pub levels: u8,
}

pub fn catalogue() -> Vec<WidgetInfo> {
  Widget::ALL
    .iter()
    .map(|w| {
      let (title, description) = match w {
        Widget::AngleQuiz => ("角的標記", "學習如何正確標記和命名角（使用三個英文字母）"),
        Widget::CircleTheorems => ("高中DSE圓形定理", "圓形幾何互動模型：不同核心定理動態演示，可拖動點觀察數值變化"),
        Widget::IdentityQuiz => ("恆等式", "展開及因式分解 (a±b)² 與 (a+b)(a−b)"),
        Widget::SimultaneousEq => ("聯立方程應用題", "由文字題找出關鍵詞，列出一對聯立方程"),
        Widget::Inequality => ("不等式", "把文字或數線轉換成不等式"),
        Widget::CompoundInequality => ("複合不等式", "以「及」「或」連接的不等式及其整數解"),
        Widget::Dispersion => ("集中趨勢及離差", "由幹葉圖、棒形圖、頻數表及框線圖計算統計量"),
        Widget::IndexLaws => ("指數定律", "運用指數定律化簡並以正指數表示"),
      };
      WidgetInfo { widget: *w, path: format!("/{}", w.slug()), title, description, levels: w.levels() }
    })
    .collect()
}

fn eq(text: &str, keywords: &[&str], skip: &[usize], preview: Option<&[usize]>, accepted: &[&str]) -> BankEquation {
  BankEquation {
    segment: Segment {
      text: text.into(),
      keywords: keywords.iter().map(|s| s.to_string()).collect(),
      skip: skip.to_vec(),
      preview_order: preview.map(<[usize]>::to_vec),
    },
    accepted: accepted.iter().map(|s| s.to_string()).collect(),
  }
}

fn item(title: &str, text: &str, vars: &str, equations: [BankEquation; 2]) -> BankQuestion {
  BankQuestion { title: title.into(), text: text.into(), vars: vars.into(), equations: equations.into() }
}

/// The curated word problems shipped with the binary. Extra entries can be
/// appended from the TOML config.
pub fn simultaneous_bank() -> Vec<BankQuestion> {
  vec![
    item(
      "遊覽船船票",
      "某觀光遊覽船只有頭等和普通等兩類船票出售。已知共售出600張船票，其中售出的普通等船票數目為售出的頭等船票數目之三倍。",
      "設 x 為頭等船票數目，y 為普通等船票數目。",
      [
        eq("某觀光遊覽船只有頭等和普通等兩類船票出售。已知共售出600張船票。", &["頭等", "和", "普通等", "共", "600"], &[], None, &["x+y=600", "y+x=600"]),
        eq("售出的普通等船票數目為售出的頭等船票數目之三倍。", &["普通等", "為", "頭等", "三倍"], &[], None, &["y=3x", "y=3*x", "y=x*3"]),
      ],
    ),
    item(
      "橙與蘋果",
      "一個橙子及一個蘋果的價錢分別為$2及$3，現花費了$46購買若干個橙子和蘋果。若所購買的橙子和蘋果的總數為20，求所購買橙子的數目。",
      "設 x 為橙子數目，y 為蘋果數目。",
      [
        eq("所購買的橙子和蘋果的總數為20。", &["橙子", "和", "蘋果", "為", "20"], &[], None, &["x+y=20", "y+x=20"]),
        eq(
          "一個橙子及一個蘋果的價錢分別為$2及$3，現花費了$46購買若干個橙子和蘋果。",
          &["花費了$46", "購買", "橙子", "和", "蘋果"],
          &[0, 1],
          Some(&[3, 4, 5, 6, 2]),
          &["2x+3y=46", "3y+2x=46"],
        ),
      ],
    ),
    item(
      "醫生診金",
      "某醫生為長者病人及非長者病人診症的診金分別為$120及$160。在某日，該醫生為67位病人診症，且總診金為$9000。該醫生當日為多少位長者病人診症？",
      "設 x 為長者病人數，y 為非長者病人數。",
      [
        eq("該醫生為67位病人診症。", &["67位病人"], &[], None, &["x+y=67", "y+x=67"]),
        eq("長者及非長者總診金為$9000。", &["長者", "非長者", "9000"], &[], None, &["120x+160y=9000", "160y+120x=9000"]),
      ],
    ),
    item(
      "郵票數量",
      "偉明和小麗擁有郵票的總數為300。若小麗從郵局購入20枚郵票，她擁有郵票的數目將為偉明擁有的4倍。求偉明擁有郵票的數目。",
      "設 x 為偉明郵票數，y 為小麗郵票數。",
      [
        eq("偉明和小麗擁有郵票的總數為300。", &["偉明", "和", "小麗", "為", "300"], &[], None, &["x+y=300", "y+x=300"]),
        eq("若小麗從郵局購入20枚郵票，她擁有郵票的數目將為偉明擁有的4倍。", &["購入20枚郵票", "將為", "偉明", "4倍"], &[], None, &["y+20=4x", "y+20=x*4", "4x=y+20"]),
      ],
    ),
    item(
      "飲品成本",
      "一瓶橙汁的成本與2瓶牛奶的成本相同。3瓶橙汁和5瓶牛奶的總成本為$66。求一瓶牛奶的成本。",
      "設 x 為一瓶橙汁的成本，y 為一瓶牛奶的成本。",
      [
        eq("一瓶橙汁的成本與2瓶牛奶的成本相同。", &["橙汁的成本", "與", "2瓶牛奶的成本", "相同"], &[1], Some(&[0, 3, 2]), &["x=2y", "x=2*y", "2y=x"]),
        eq("3瓶橙汁和5瓶牛奶的總成本為$66。", &["3瓶橙汁", "和", "5瓶牛奶", "為", "66"], &[], None, &["3x+5y=66", "5y+3x=66"]),
      ],
    ),
    item(
      "夏令營人數",
      "在某夏令營，男生人數與女生人數之比為7:6。若17名男生和4名女生離開該夏令營，則男生人數與女生人數相等。求在夏令營原本的女生人數。",
      "設 x 為男生人數，y 為女生人數。",
      [
        eq("男生人數與女生人數之比為7:6。", &["男生人數", "與", "女生人數", "之比為", "7:6"], &[], None, &["x/y=7/6", "6x=7y", "x:y=7:6"]),
        eq("若17名男生和4名女生離開，人數相等。", &["17名男生", "和", "4名女生離開", "人數相等"], &[1], Some(&[0, 3, 2]), &["x-17=y-4", "y-4=x-17"]),
      ],
    ),
    item(
      "足球聯賽",
      "在某足球聯賽，每一球隊贏取一場球賽得3分，和得1分，而輸得0分。該聯賽的冠軍隊作賽36場且共得84分。已知該冠軍隊沒有輸掉任何一場球賽，求該冠軍隊贏取球賽的場數。",
      "設 x 為贏的場數，y 為和的場數。",
      [
        eq("該冠軍隊作賽36場（已知該冠軍隊沒有輸掉任何一場球賽）。", &["作賽36場"], &[], None, &["x+y=36", "y+x=36"]),
        eq("共得84分（贏取一場球賽得3分及和得1分）。", &["共得", "84", "贏取一場球賽得3分", "及", "和得1分"], &[], Some(&[1, 0, 2, 3, 4]), &["84=3x+y", "3x+y=84"]),
      ],
    ),
    item(
      "保安員人數",
      "在設有6個展區的展覽中心內有132名保安員。各個展區均有相同人數的保安員。在每個展區內，女保安員均較男保安員多4名。求在該展覽中心內男保安員的人數。",
      "設 x 為每個展區的男保安員人數，y 為每個展區的女保安員人數。",
      [
        eq("在設有6個展區的展覽中心內有132名保安員。各個展區均有相同人數的保安員。", &["6個展區", "132名保安員"], &[], None, &["6(x+y)=132", "6x+6y=132"]),
        eq("在每個展區內，女保安員均較男保安員多4名。", &["女", "較", "男", "多4名"], &[], None, &["y=x+4", "y-x=4"]),
      ],
    ),
    item(
      "梨與橙",
      "7個梨和3個橙的價錢為$47，而5個梨和6個橙的價錢為$49。求一個梨的價錢。",
      "設 x 為一個梨的價錢，y 為一個橙的價錢。",
      [
        eq("7個梨和3個橙的價錢為$47。", &["7個梨", "和", "3個橙", "為", "47"], &[], None, &["7x+3y=47"]),
        eq("而5個梨和6個橙的價錢為$49。", &["5個梨", "和", "6個橙", "為", "49"], &[], None, &["5x+6y=49"]),
      ],
    ),
    item(
      "蘋果轉讓",
      "佩玲擁有蘋果的數目為志偉擁有的4倍。若佩玲將她其中的12個蘋果送給志偉，他們將擁有相同數目的蘋果。求佩玲和志偉擁有蘋果的總數。",
      "設 x 為佩玲擁有蘋果的數目，y 為志偉擁有蘋果的數目。",
      [
        eq("佩玲擁有蘋果的數目為志偉擁有的4倍。", &["佩玲", "為", "志偉", "4倍"], &[], None, &["x=4y", "x=y*4"]),
        eq("佩玲將她其中的12個送給志偉，他們將擁有相同數目。", &["佩玲", "12個送給志偉", "相同"], &[], Some(&[0, 2, 1]), &["x-12=y+12", "y+12=x-12"]),
      ],
    ),
    item(
      "劇院門票",
      "某劇院只有兩類門票：正價票及特惠票，票價分別為$126及$78。在某日，售出正價票的數目為售出特惠票的數目之5倍，且售出門票所得的總金額為$50976。求該日售出門票的總數。",
      "設 x 為正價票數目，y 為特惠票數目。",
      [
        eq("售出正價票的數目為售出特惠票的數目之5倍。", &["正價", "為", "特惠票", "5倍"], &[], None, &["x=5y"]),
        eq("正價票及特惠票的票價分別為$126及$78，且售出門票所得的總金額為$50976。", &["總金額", "為", "50976"], &[], None, &["126x+78y=50976"]),
      ],
    ),
    item(
      "遊樂場人數",
      "在某遊樂場，成人人數與小童人數之比為13:6。若9名成人和24名小童進入該遊樂場，則成人人數與小童人數之比為8:7。求在該遊樂場原本的成人人數。",
      "設 x 為原本的成人人數，y 為原本的小童人數。",
      [
        eq("成人人數與小童人數之比為13:6。", &["成人人數", "與", "小童人數", "之比為", "13:6"], &[], None, &["x/y=13/6", "6x=13y"]),
        eq("9名成人和24名小童進入後，比為8:7。", &["9名成人", "和", "24名小童進入", "比為", "8:7"], &[], None, &["(x+9)/(y+24)=8/7", "7(x+9)=8(y+24)"]),
      ],
    ),
    item(
      "貼紙轉讓",
      "某男生擁有的貼紙數目為某女生擁有的3倍。若該男生將他其中的20張貼紙送給該女生，則該女生擁有貼紙的數目為該男生擁有的2倍。求該男生和該女生擁有貼紙的總數。",
      "設 x 為男生擁有貼紙的數目，y 為女生擁有貼紙的數目。",
      [
        eq("某男生擁有的貼紙數目為某女生擁有的3倍。", &["男生", "為", "女生", "3倍"], &[], None, &["x=3y", "3y=x"]),
        eq(
          "若該男生將他其中的20張貼紙送給該女生，則該女生擁有貼紙的數目為該男生擁有的2倍。",
          &["男生將他其中的20張貼紙", "女生擁有貼紙的數目", "為", "男生擁有的", "2倍"],
          &[0],
          None,
          &["y+20=2(x-20)", "2(x-20)=y+20"],
        ),
      ],
    ),
    item(
      "兩數關係",
      "設 x 及 y 為兩數。x 與 y 之和為456，而7與 x 之積為 y。求 x。",
      "設 x、y 為兩數。",
      [
        eq("x與y之和為456。", &["x", "與", "y", "之和為", "456"], &[], None, &["x+y=456", "y+x=456"]),
        eq("7與x之積為y。", &["7", "與", "x", "之積為", "y"], &[], None, &["7x=y", "y=7x"]),
      ],
    ),
  ]
}
